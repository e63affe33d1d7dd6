pub mod item;
pub mod payload;
pub mod rule;
pub mod selection;

pub use item::{Field, ItemType, RawLineItem};
pub use payload::{CommentSection, ConsolidatedPayload, CustomerRef, NormalizedItem, PayloadLine};
pub use rule::{CustomerRule, CustomerRules};
pub use selection::{
    DeleteRequest, OrderDetails, OrderSelection, StatusResponse, SubmitRequest, SubmitResponse,
};
