use serde::{Deserialize, Serialize};

/// Streaming window strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowKind {
    /// No windowing; grouping spans the whole stream.
    #[default]
    None,

    /// Fixed, non-overlapping buckets; the advance equals the length.
    Tumbling,

    /// Fixed buckets that advance by less than their length, so a record
    /// lands in more than one bucket.
    Hopping,

    /// Re-evaluated on every record over the trailing span.
    Sliding,

    /// Closed by a gap of inactivity.
    Session,
}

/// Window descriptor carried inside [`Dimensions`](crate::ast::Dimensions).
///
/// Pure configuration data: bucket assignment, firing, and watermarking are
/// the scheduler's job in the executor that consumes the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Window {
    pub kind: WindowKind,

    /// Span covered by the window.
    pub length: i64,

    /// Advance step between buckets, or the inactivity gap for session
    /// windows.
    pub interval: i64,
}

impl Window {
    /// Non-overlapping fixed buckets; each record lands in exactly one.
    pub fn tumbling(length: i64) -> Self {
        Window {
            kind: WindowKind::Tumbling,
            length,
            interval: length,
        }
    }

    /// Overlapping fixed buckets advancing by `interval`.
    pub fn hopping(length: i64, interval: i64) -> Self {
        Window {
            kind: WindowKind::Hopping,
            length,
            interval,
        }
    }

    /// Trailing span re-evaluated on every record.
    pub fn sliding(length: i64) -> Self {
        Window {
            kind: WindowKind::Sliding,
            length,
            interval: 0,
        }
    }

    /// Session closed after `gap` without activity.
    pub fn session(gap: i64) -> Self {
        Window {
            kind: WindowKind::Session,
            length: 0,
            interval: gap,
        }
    }
}

#[test]
fn tumbling_advance_equals_length() {
    let w = Window::tumbling(60);
    assert_eq!(w.interval, w.length);
}

#[test]
fn default_is_no_window() {
    assert_eq!(Window::default().kind, WindowKind::None);
}
