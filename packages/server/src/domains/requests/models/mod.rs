pub mod request;
pub mod status;

pub use request::{
    Attachment, Budget, Message, NewRequest, Quotation, Request, RequestChanges, RequestKind,
    RequestView, DEFAULT_CURRENCY,
};
pub(crate) use request::RequestRow;
pub use status::RequestStatus;
