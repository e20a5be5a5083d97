use daylight_clock::{ClockConfig, ClockStore, FixedStepDriver, KeyValueStore};
use daylight_engine::coords::Viewport;
use daylight_engine::core::{App, AppControl, FrameCtx};
use daylight_engine::paint::Color;
use daylight_engine::render::{QuadRenderer, TextRenderer};
use daylight_engine::scene::DrawList;
use daylight_engine::text::{FontId, FontSystem};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::display::Display;
use crate::scene::{self, PanelLayout};
use crate::status::StatusPanel;

/// The clock window: drives the clock from frame time and draws its state.
pub struct DaylightApp {
    clock: ClockStore<Box<dyn KeyValueStore>>,
    driver: FixedStepDriver,
    display: Display,
    fonts: FontSystem,
    font: Option<FontId>,
    quads: QuadRenderer,
    text: TextRenderer,
    draw_list: DrawList,
}

impl DaylightApp {
    pub fn new(
        clock: ClockStore<Box<dyn KeyValueStore>>,
        config: &ClockConfig,
        name: &str,
    ) -> Self {
        let brightness = daylight_clock::daylight::brightness(clock.time_of_day_tick());
        let status = StatusPanel::new(name, clock.format_timestamp(), brightness);
        Self {
            clock,
            driver: FixedStepDriver::new(config),
            display: Display::new(status, brightness),
            fonts: FontSystem::new(),
            font: None,
            quads: QuadRenderer::new(),
            text: TextRenderer::new(),
            draw_list: DrawList::new(),
        }
    }

    /// Uses `bytes` for the status panel text. Unreadable fonts leave the
    /// panel drawing placeholder bars.
    pub fn with_font(mut self, bytes: &[u8]) -> Self {
        match self.fonts.load_font(bytes) {
            Ok(id) => self.font = Some(id),
            Err(err) => log::warn!("{err}; status text falls back to bars"),
        }
        self
    }

    fn panel_layout(&self, viewport: Viewport, rows: &[(String, f32)]) -> PanelLayout {
        let width = match self.font {
            Some(font) => scene::widest_row(rows, |text, size| {
                self.fonts.measure_text(text, font, size).x
            }),
            None => scene::widest_row(rows, scene::estimate_width),
        };
        PanelLayout::new(viewport, width)
    }
}

impl App for DaylightApp {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.driver
            .on_frame_advance(ctx.time.frame_units(), &mut self.clock, &mut self.display);

        ctx.window.set_title(&self.display.status.title());

        let viewport = ctx.window.logical_size();
        let rows = scene::panel_rows(&self.display.status);
        let layout = self.panel_layout(viewport, &rows);

        self.draw_list.clear();
        scene::push_grid(&mut self.draw_list, viewport, self.display.rotation);
        scene::push_panel(&mut self.draw_list, &layout, &rows, self.font, self.display.brightness);

        let [r, g, b] = self.display.backdrop();
        let clear = Color::from_srgb_u8(r, g, b, 0xff);

        let Self { quads, text, fonts, draw_list, .. } = self;
        ctx.render(clear, |rctx, target| {
            quads.render(rctx, target, draw_list);
            text.render(rctx, target, draw_list, fonts);
        })
    }

    fn on_exit(&mut self) {
        log::info!(
            "closing at tick {} ({})",
            self.clock.elapsed_ticks(),
            self.clock.format_timestamp()
        );
        self.clock.save();
    }
}
