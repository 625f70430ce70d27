pub mod ticker;

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Timelike};
use dialicon_proto::{
    config::ClockIconConfig,
    ports::{
        badging::{BadgingError, BadgingPort, UserHandle},
        compositor::{Canvas, ClockDrawable, Drawable, LayeredDrawable, RgbaBitmap},
        profile::DeviceProfilePort,
        time::ClockPort,
    },
};

use crate::services::time::local_offset;

/// Fraction of the icon bitmap size reserved as compositing offset.
const PIXEL_OFFSET_FRACTION: f32 = 0.010_416_7;

/// Indices of the animated hand layers inside the icon's layered structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandIndices {
    pub hour: Option<usize>,
    pub minute: Option<usize>,
    pub second: Option<usize>,
}

impl HandIndices {
    pub fn from_config(config: &ClockIconConfig) -> Self {
        Self {
            hour: config.hour_layer,
            minute: config.minute_layer,
            second: config.second_layer,
        }
    }

    pub fn has_second_hand(&self) -> bool {
        self.second.is_some()
    }
}

/// Hand positions baked into the icon artwork, treated as angle zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandOrigin {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl HandOrigin {
    pub fn from_config(config: &ClockIconConfig) -> Self {
        Self {
            hour: config.default_hour,
            minute: config.default_minute,
            second: config.default_second,
        }
    }
}

/// Badged bitmap rendition of the icon background plus layout metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct IconSnapshot {
    pub bitmap: RgbaBitmap,
    pub scale: f32,
    pub pixel_offset: u32,
}

/// A clock-face icon animating hand layers of a layered icon drawable.
///
/// The icon is driven from the host UI thread: an external scheduler calls
/// [`update_angles`](ClockIcon::update_angles) and repaints when it reports a
/// change. A blank icon (no drawable bound) ignores ticks and cannot be
/// cloned.
#[derive(Debug)]
pub struct ClockIcon {
    clock: Arc<dyn ClockPort>,
    timezone: FixedOffset,
    drawable: Option<ClockDrawable>,
    hands: HandIndices,
    origin: HandOrigin,
    snapshot: Option<IconSnapshot>,
}

impl ClockIcon {
    /// Clock icon with no drawable bound.
    pub fn blank(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            clock,
            timezone: local_offset(),
            drawable: None,
            hands: HandIndices::default(),
            origin: HandOrigin::default(),
            snapshot: None,
        }
    }

    /// Bind `drawable` using the hand layout from a validated `config`.
    ///
    /// The hand math relies on the default positions staying on the dial, so
    /// callers must run [`ClockIconConfig::validate`] first.
    pub fn bind(
        clock: Arc<dyn ClockPort>,
        drawable: ClockDrawable,
        config: &ClockIconConfig,
    ) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "clock icon config must be validated before binding"
        );

        Self {
            clock,
            timezone: config.timezone.unwrap_or_else(local_offset),
            drawable: Some(drawable),
            hands: HandIndices::from_config(config),
            origin: HandOrigin::from_config(config),
            snapshot: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.drawable.is_none()
    }

    pub fn hand_indices(&self) -> HandIndices {
        self.hands
    }

    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    /// Rebind the time zone used by subsequent [`update_angles`] calls.
    ///
    /// [`update_angles`]: ClockIcon::update_angles
    pub fn set_time_zone(&mut self, timezone: FixedOffset) {
        self.timezone = timezone;
    }

    /// The layered structure holding the clock hands, when one exists.
    pub fn hands(&self) -> Option<&LayeredDrawable> {
        self.drawable.as_ref().and_then(ClockDrawable::hands)
    }

    /// The background layer for adaptive icons, the whole drawable otherwise.
    pub fn background(&self) -> Option<&dyn Drawable> {
        self.drawable.as_ref().map(ClockDrawable::background)
    }

    /// The badged background snapshot produced by [`setup_background`].
    ///
    /// [`setup_background`]: ClockIcon::setup_background
    pub fn snapshot(&self) -> Option<&IconSnapshot> {
        self.snapshot.as_ref()
    }

    /// Independent copy for a second display surface.
    ///
    /// Returns `None` when no drawable is bound or the copied drawable does
    /// not resolve to a layered structure. The copy never aliases the
    /// original's layer state.
    pub fn clone_icon(&self) -> Option<Self> {
        let drawable = self.drawable.clone()?;
        drawable.hands()?;

        Some(Self {
            clock: Arc::clone(&self.clock),
            timezone: self.timezone,
            drawable: Some(drawable),
            hands: self.hands,
            origin: self.origin,
            snapshot: self.snapshot.clone(),
        })
    }

    /// Render the badged background snapshot through the host badging service.
    ///
    /// The badging session acquired here is released on every exit path. The
    /// stored pixel offset is `ceil(0.0104167 * icon_bitmap_size)` and feeds
    /// later custom compositing.
    ///
    /// # Errors
    ///
    /// Returns [`BadgingError`] when no drawable is bound or the backend
    /// fails to render the icon.
    pub fn setup_background(
        &mut self,
        badging: &dyn BadgingPort,
        profile: &dyn DeviceProfilePort,
        user: UserHandle,
    ) -> Result<(), BadgingError> {
        let Some(drawable) = self.drawable.as_ref() else {
            return Err(BadgingError::message("setup_background", "no drawable bound"));
        };

        let icon_size = profile.icon_bitmap_size();
        let mut session = badging.obtain()?;
        let badged = session.create_badged_icon(drawable.background(), user, icon_size)?;

        self.snapshot = Some(IconSnapshot {
            bitmap: badged.bitmap,
            scale: badged.scale,
            pixel_offset: (PIXEL_OFFSET_FRACTION * icon_size as f32).ceil() as u32,
        });

        Ok(())
    }

    /// Push the current time into the configured hand layers.
    ///
    /// The hour hand level also advances with the minute so its motion stays
    /// smooth; the second hand level has 100ms granularity. Returns `true`
    /// when any configured layer's level actually changed, signalling that a
    /// repaint is needed. Without a resolvable layered structure this is a
    /// no-op returning `false`.
    pub fn update_angles(&mut self) -> bool {
        let now = self.clock.now().with_timezone(&self.timezone);
        let Some(layers) = self.drawable.as_mut().and_then(ClockDrawable::hands_mut) else {
            return false;
        };

        let (hour, minute, _, millis) = offset_fields(&now, self.origin);

        let mut changed = false;
        if let Some(index) = self.hands.hour {
            changed |= layers.set_layer_level(index, hour * 60 + now.minute());
        }
        if let Some(index) = self.hands.minute {
            changed |= layers.set_layer_level(index, minute + (now.hour() % 12) * 60);
        }
        if let Some(index) = self.hands.second {
            changed |= layers.set_layer_level(index, millis / 100);
        }
        changed
    }

    /// Clip the canvas to the icon mask. No-op for non-adaptive icons.
    pub fn clip_to_mask(&self, canvas: &mut dyn Canvas) {
        if let Some(drawable) = &self.drawable {
            drawable.clip_to_mask(canvas);
        }
    }

    /// Paint the animated hands without redrawing the cached background.
    pub fn draw_foreground(&self, canvas: &mut dyn Canvas) {
        if let Some(drawable) = &self.drawable {
            drawable.draw_foreground(canvas);
        }
    }
}

/// Clock fields shifted by the artwork's zero position.
///
/// The `+12`/`+60` bias keeps every modulo result non-negative even when the
/// origin exceeds the current field value.
fn offset_fields(now: &DateTime<FixedOffset>, origin: HandOrigin) -> (u32, u32, u32, u32) {
    let hour = (now.hour() % 12 + (12 - origin.hour)) % 12;
    let minute = (now.minute() + (60 - origin.minute)) % 60;
    let second = (now.second() + (60 - origin.second)) % 60;
    // chrono encodes leap seconds as subsecond values above 999ms
    let millis = second * 1000 + now.timestamp_subsec_millis().min(999);

    (hour, minute, second, millis)
}
