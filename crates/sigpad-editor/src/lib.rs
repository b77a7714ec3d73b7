pub mod history;
pub mod input;
pub mod notify;
pub mod repaint;
pub mod surface;

pub use history::{History, Restore};
pub use input::{InputEvent, PointerKind};
pub use notify::{Notice, NoticeLevel, NoticeQueue, NotificationSink};
pub use repaint::{RepaintRequest, RepaintTicket};
pub use surface::{DrawingSurface, EventOutcome, Export};
