use super::catalog::Catalog;
use super::model::{Wheel, WheelState};
use super::{
    ITEM_ORBIT_RADIUS, REF_SCREEN_WIDTH, START_OFFSET, TEX_BACKGROUND_SIZE, TEX_CURSOR_SIZE,
    TEX_ITEM_SIZE, TEX_LOGO_SIZE,
};
use palette::Srgba;
use pinput::input::Point;
use std::f64::consts::TAU;
use std::time::Instant;

/// Item sprites are authored for a wheel of this many sectors.
const ITEM_BASE_SECTORS: f64 = 6.0;
const TIMER_PERIOD_MS: f64 = 1010.0;
const TIMER_WRAP: f64 = 55000.0;

/// Sprite size as a fraction of the screen on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    /// A square of `pixels` reference pixels, kept square on the actual screen.
    pub fn square(pixels: f64, scale: f64, aspect: f64) -> Self {
        let width = scale * pixels / REF_SCREEN_WIDTH;
        Self {
            width,
            height: width / aspect,
        }
    }
}

/// Everything the renderer reads in one tick, captured after all pending
/// input has been routed.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Wheel center as a fraction of the screen.
    pub center: Point,
    pub scale: f64,
    pub aspect: f64,
    pub sectors: usize,
    pub hovered: Option<usize>,
    pub favorite: Option<usize>,
    pub fade_in: f64,
    pub hover: f64,
    /// Synthetic cursor, as a fraction of the screen. Action mode only.
    pub cursor: Option<Point>,
    pub timer: f64,
}

impl Frame {
    pub fn capture<C: Catalog, H>(wheel: &Wheel<C, H>, now: Instant) -> Option<Self> {
        if wheel.state != WheelState::Visible || wheel.screen.is_empty() {
            return None;
        }

        let elapsed_ms = now.saturating_duration_since(wheel.epoch).as_millis() as f64;
        Some(Self {
            center: wheel.position,
            scale: wheel.scale,
            aspect: wheel.screen.aspect(),
            sectors: wheel.catalog.sector_count(),
            hovered: wheel.hovered,
            favorite: wheel.catalog.favorite(),
            fade_in: wheel.fade_in.progress_at(now),
            hover: wheel.hover.progress_at(now),
            cursor: wheel
                .action_mode
                .then(|| wheel.screen.normalize(wheel.pointer)),
            timer: (elapsed_ms / TIMER_PERIOD_MS) % TIMER_WRAP,
        })
    }

    /// Item shown in the middle circle: the hovered one, else the favorite.
    pub fn central_item(&self) -> Option<usize> {
        self.hovered.or(self.favorite)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background {
        center: Point,
        size: Extent,
        fade_in: f64,
        hover: f64,
        timer: f64,
    },
    Item {
        index: usize,
        center: Point,
        size: Extent,
        hovered: bool,
        enabled: bool,
    },
    CenterLogo {
        item: usize,
        center: Point,
        size: Extent,
        color: Srgba<f32>,
    },
    Cursor {
        at: Point,
        size: Extent,
        highlighted: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemGeometry {
    pub center: Point,
    pub size: Extent,
}

impl ItemGeometry {
    /// Clockwise from the top, matching the hit test's sector order.
    pub fn angle(index: usize, sectors: usize) -> f64 {
        START_OFFSET + index as f64 * TAU / sectors as f64
    }

    /// Places item `index` on the ring. Sprites shrink as the ring fills up
    /// and grow a little when it is sparse.
    pub fn calculate(index: usize, frame: &Frame) -> Self {
        let sectors = frame.sectors.max(1) as f64;
        let density = (ITEM_BASE_SECTORS / sectors).sqrt().min(1.25);

        let angle = Self::angle(index, frame.sectors.max(1));
        let orbit = ITEM_ORBIT_RADIUS * frame.scale;
        // orbit is in width units; y goes back to height units
        let center = Point::new(
            frame.center.x + orbit * angle.cos(),
            frame.center.y + orbit * angle.sin() / frame.aspect,
        );

        Self {
            center,
            size: Extent::square(TEX_ITEM_SIZE * density, frame.scale, frame.aspect),
        }
    }
}

/// Draw list for one frame, back to front.
pub fn build(frame: &Frame, catalog: &impl Catalog) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(frame.sectors + 3);

    commands.push(DrawCommand::Background {
        center: frame.center,
        size: Extent::square(TEX_BACKGROUND_SIZE, frame.scale, frame.aspect),
        fade_in: frame.fade_in,
        hover: frame.hover,
        timer: frame.timer,
    });

    commands.extend((0..frame.sectors).map(|index| {
        let geometry = ItemGeometry::calculate(index, frame);
        DrawCommand::Item {
            index,
            center: geometry.center,
            size: geometry.size,
            hovered: frame.hovered == Some(index),
            enabled: catalog.is_enabled(index),
        }
    }));

    if let Some(item) = frame.central_item() {
        commands.push(DrawCommand::CenterLogo {
            item,
            center: frame.center,
            size: Extent::square(TEX_LOGO_SIZE, frame.scale, frame.aspect),
            color: catalog
                .color(item)
                .unwrap_or(Srgba::new(1.0, 1.0, 1.0, 1.0)),
        });
    }

    if let Some(cursor) = frame.cursor {
        // sprite hangs below and right of the hot spot
        let size = Extent::square(TEX_CURSOR_SIZE, 1.0, frame.aspect);
        commands.push(DrawCommand::Cursor {
            at: Point::new(cursor.x + size.width / 2.0, cursor.y + size.height / 2.0),
            size,
            highlighted: frame.hovered.is_some(),
        });
    }

    commands
}
