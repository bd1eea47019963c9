pub mod config;
pub mod history;
pub mod input;
pub mod notify;
pub mod pad;
pub mod redraw;
pub mod tools;

pub use config::{EXPORT_FILE_NAME, LeavePolicy, PadConfig};
pub use history::{CommandId, Entry, History};
pub use input::InputEvent;
pub use notify::{ChangeNotifier, ListenerId};
pub use pad::{Availability, PadStatus, SketchPad};
pub use redraw::{Scene, redraw, render_commands};
pub use tools::{ActiveTool, ToolState};
