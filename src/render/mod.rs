//! Screen rendering: model projection and the view-op protocol

mod screen;
mod tree;
mod view;

pub use screen::{badge_node, project};
pub use tree::{MountState, ViewTree};
pub use view::{MountPoint, ScreenFrame, ViewNode, ViewOp};
