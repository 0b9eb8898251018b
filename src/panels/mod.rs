mod central_panel;
mod file_browser;
mod tools_panel;

pub use central_panel::central_panel;
pub use file_browser::{FileBrowser, file_browser};
pub use tools_panel::{toast_frame, tools_panel};
