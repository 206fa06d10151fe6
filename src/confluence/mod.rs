//! Documentation-service integration for release pages

mod publisher;
mod render;

pub use publisher::{PagePublisher, PageRequest, PublishedPage, SpaceRecord};
pub use render::{ReleaseLink, links_from_report, render_release_page};
