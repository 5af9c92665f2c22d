//! Confluence REST API types.

mod attachment;
mod label;
mod page;

pub use attachment::{Attachment, AttachmentVersion, AttachmentsResponse};
pub use label::{Label, LabelsResponse};
pub use page::{Body, Links, Page, Storage, Version};
