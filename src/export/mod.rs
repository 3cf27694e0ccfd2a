//! Composes the drawing, a header and the ruled text grid into one PNG page.

pub mod entry;
pub mod page;

pub use entry::{DiaryEntry, Weather, sanitize_file_component};
pub use page::{ExportedImage, PageLayout, export_diary, render_page};
