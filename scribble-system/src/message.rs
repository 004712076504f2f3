use serde::{Deserialize, Serialize};

pub type ConnectionId = u16;

/// Canvas position in client pixel space.
pub type Point = euclid::default::Point2D<f32>;

/// Bounds a stroke must satisfy before it may enter the log. Anything past
/// these is a malformed or misbehaving client, not a drawing.
pub const MAX_STROKE_POINTS: usize = 16_384;
pub const MAX_STROKE_WIDTH: f32 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// CSS-style hex string, e.g. "#FF0000".
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A connected drawer. Created on connect, immutable, destroyed on
/// disconnect. Operations in the log keep their own copy, so a user remains
/// attributed after leaving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: ConnectionId,
    pub color: Color,
}

/// A finished stroke, transmitted whole on stroke-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeData {
    pub color: Color,
    pub width: f32,
    pub points: Vec<Point>,
}

impl StrokeData {
    pub fn validate(&self) -> Result<(), CanvasError> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(CanvasError::InvalidOperation {
                reason: "stroke width must be a positive, finite number".into(),
            });
        }
        if self.width > MAX_STROKE_WIDTH {
            return Err(CanvasError::InvalidOperation {
                reason: "stroke width exceeds the maximum".into(),
            });
        }
        if self.points.is_empty() {
            return Err(CanvasError::InvalidOperation {
                reason: "stroke has no points".into(),
            });
        }
        if self.points.len() > MAX_STROKE_POINTS {
            return Err(CanvasError::InvalidOperation {
                reason: "stroke has too many points".into(),
            });
        }
        if self
            .points
            .iter()
            .any(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(CanvasError::InvalidOperation {
                reason: "stroke contains a non-finite coordinate".into(),
            });
        }
        Ok(())
    }
}

/// One committed, replayable drawing action. Future kinds (erase, image
/// paste, ...) extend this enum; replaying clients skip kinds they do not
/// understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    Stroke { user: User, data: StrokeData },
}

impl Operation {
    pub fn user(&self) -> &User {
        match self {
            Operation::Stroke { user, .. } => user,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStart {
    pub color: Color,
    pub width: f32,
    pub start_pos: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeDraw {
    pub pos: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorMove {
    pub x: f32,
    pub y: f32,
}

/// Rejections for commands that fail validation. The connection stays open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CanvasError {
    InvalidOperation { reason: String },
}

/// Everything a client may send over its connection.
///
/// StrokeStart, StrokeDraw and CursorMove are relay-only and never touch
/// the log. StrokeEnd carries the whole stroke and is the commit point.
/// Cursor rate limiting (one update per ~33ms) is the sender's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CanvasCommand {
    StrokeStart(StrokeStart),
    StrokeDraw(StrokeDraw),
    StrokeEnd(StrokeData),
    CursorMove(CursorMove),
    Undo,
    Redo,
}

/// Everything the server may push to a client.
///
/// A new connection receives Registered, HistoryInit and UserList, in that
/// order, before any other traffic. HistoryUpdate carries the full history
/// after every state-changing undo/redo; receivers clear and replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CanvasEvent {
    Registered { user: User },
    HistoryInit { operations: Vec<Operation> },
    HistoryUpdate { operations: Vec<Operation> },
    UserList { users: Vec<User> },
    UserJoined { user: User },
    UserLeft { user_id: ConnectionId },
    StrokeStarted { user: User, data: StrokeStart },
    StrokeDrawn { user: User, data: StrokeDraw },
    CursorMoved { user: User, data: CursorMove },
    Rejected { error: CanvasError },
}
