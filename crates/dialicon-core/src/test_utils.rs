#![cfg(test)]

use std::{
    any::Any,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use chrono::{DateTime, Utc};
use dialicon_proto::ports::{
    badging::{BadgedBitmap, BadgingError, BadgingPort, BadgingSession, UserHandle},
    compositor::{Canvas, Drawable, LayeredDrawable, MaskShape, RgbaBitmap},
    profile::DeviceProfilePort,
    time::ClockPort,
};

/// Clock returning a programmable instant.
#[derive(Debug)]
pub(crate) struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub(crate) fn new(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    pub(crate) fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock lock") = now;
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// Minimal level-carrying layer.
#[derive(Debug, Clone, Default)]
pub(crate) struct StubLayer {
    level: u32,
}

impl Drawable for StubLayer {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_bitmap(&RgbaBitmap::solid(1, 1, [255, 255, 255, 255]), 0, 0);
    }

    fn set_level(&mut self, level: u32) -> bool {
        if self.level == level {
            return false;
        }
        self.level = level;
        true
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn clone_drawable(&self) -> Box<dyn Drawable> {
        Box::new(self.clone())
    }
}

pub(crate) fn layered_stack(count: usize) -> LayeredDrawable {
    LayeredDrawable::new(
        (0..count)
            .map(|_| Box::new(StubLayer::default()) as Box<dyn Drawable>)
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CanvasOp {
    Clip(MaskShape),
    Bitmap { dx: i32, dy: i32 },
}

/// Canvas recording the operations applied to it.
#[derive(Debug, Default)]
pub(crate) struct RecordingCanvas {
    pub(crate) ops: Vec<CanvasOp>,
}

impl Canvas for RecordingCanvas {
    fn clip_mask(&mut self, mask: MaskShape) {
        self.ops.push(CanvasOp::Clip(mask));
    }

    fn draw_bitmap(&mut self, _bitmap: &RgbaBitmap, dx: i32, dy: i32) {
        self.ops.push(CanvasOp::Bitmap { dx, dy });
    }

    fn as_any(&mut self) -> &mut dyn Any {
        self
    }
}

/// Badging backend handing out sessions that count their release.
#[derive(Debug)]
pub(crate) struct StubBadger {
    released: Arc<AtomicUsize>,
}

impl StubBadger {
    pub(crate) fn new(released: Arc<AtomicUsize>) -> Self {
        Self { released }
    }
}

impl BadgingPort for StubBadger {
    fn obtain(&self) -> Result<Box<dyn BadgingSession + '_>, BadgingError> {
        Ok(Box::new(StubBadgingSession {
            released: Arc::clone(&self.released),
        }))
    }
}

struct StubBadgingSession {
    released: Arc<AtomicUsize>,
}

impl BadgingSession for StubBadgingSession {
    fn create_badged_icon(
        &mut self,
        _icon: &dyn Drawable,
        _user: UserHandle,
        icon_size: u32,
    ) -> Result<BadgedBitmap, BadgingError> {
        Ok(BadgedBitmap {
            bitmap: RgbaBitmap::solid(icon_size, icon_size, [0, 0, 0, 255]),
            scale: 0.92,
        })
    }
}

impl Drop for StubBadgingSession {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::Relaxed);
    }
}

/// Device profile with a fixed icon bitmap size.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedProfile(pub(crate) u32);

impl DeviceProfilePort for FixedProfile {
    fn icon_bitmap_size(&self) -> u32 {
        self.0
    }
}
