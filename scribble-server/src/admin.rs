use scribble_system::User;
use tokio::sync::oneshot::Sender;

#[derive(Debug)]
pub enum AdminCommand {
    DescribeCanvas { tx: Sender<CanvasDescription> },
}

/// Point-in-time view of the canvas for the admin surface.
#[derive(Debug, Clone)]
pub struct CanvasDescription {
    pub users: Vec<User>,
    pub history_len: usize,
    pub redo_len: usize,
}
