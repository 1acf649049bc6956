use crate::config::{ShellConfig, PALETTE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::device::{InputDevice, PowerControl, PowerRequest, VideoDevice};
use crate::dirty::DirtyTracker;
use crate::render;
use crate::scancode;
use crate::session::Session;
use crate::shell::Layout;
use crate::surface::PixelSurface;

/// The frame loop: poll one byte, update the session, redraw when something
/// visible changed, and hand power requests to the power collaborator.
pub struct Desktop<V, I, P> {
    video: V,
    input: I,
    power: P,
    config: &'static ShellConfig,
    layout: Layout,
    surface: PixelSurface,
    session: Session,
    dirty: DirtyTracker,
    blink_ticks: u32,
}

impl<V: VideoDevice, I: InputDevice, P: PowerControl> Desktop<V, I, P> {
    /// Switches the display mode and loads the palette.
    pub fn new(mut video: V, input: I, power: P, config: &'static ShellConfig) -> Self {
        video.set_mode();
        for (idx, color) in PALETTE.iter().enumerate() {
            let (r, g, b) = color.to_dac();
            video.set_palette(idx as u8, r, g, b);
        }
        let (w, h) = (SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32);
        log::info!("desktop: {}x{} with {} dock icons", w, h, config.dock_icons.len());
        Self {
            video,
            input,
            power,
            config,
            layout: Layout::compute(config, w, h),
            surface: PixelSurface::new(),
            session: Session::new(config, w, h),
            dirty: DirtyTracker::new(),
            blink_ticks: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn video(&self) -> &V {
        &self.video
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// One loop iteration. A pending power request is returned only after
    /// the frame showing its status line has been presented.
    pub fn tick(&mut self) -> Option<PowerRequest> {
        self.session.shell.tick_highlight();
        self.advance_blink();

        let mut power = None;
        if let Some(evt) = self.input.poll().and_then(scancode::decode) {
            self.dirty.mark();
            power = self.session.handle(evt, self.config, &self.layout);
        }

        if self.dirty.take(self.session.snapshot()) {
            render::draw_frame(&mut self.surface, self.config, &self.layout, &self.session);
            self.surface.flip(&mut self.video);
        }
        power
    }

    fn advance_blink(&mut self) {
        if !self.session.typing() {
            self.session.caret_visible = true;
            self.blink_ticks = 0;
            return;
        }
        self.blink_ticks += 1;
        if self.blink_ticks >= self.config.timing.blink_interval {
            self.blink_ticks = 0;
            self.session.caret_visible = !self.session.caret_visible;
        }
    }

    pub fn run(mut self) -> ! {
        log::info!("desktop: entering main loop");
        loop {
            if let Some(request) = self.tick() {
                log::info!("desktop: {} requested", request.label());
                request.execute(&mut self.power);
            }
            for _ in 0..self.config.timing.idle_spins {
                core::hint::spin_loop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{PanickingPower, RecordingVideo, ScriptedInput};
    use std::boxed::Box;

    type TestDesktop = Desktop<RecordingVideo, ScriptedInput, PanickingPower>;

    static CFG: ShellConfig = ShellConfig::DEFAULT;

    fn desktop(bytes: &[u8]) -> Box<TestDesktop> {
        Box::new(Desktop::new(
            RecordingVideo::default(),
            ScriptedInput::new(bytes),
            PanickingPower,
            &CFG,
        ))
    }

    fn drain(d: &mut TestDesktop) -> Option<PowerRequest> {
        let mut power = None;
        while d.input_mut().remaining() > 0 {
            power = d.tick().or(power);
        }
        power
    }

    #[test]
    fn startup_programs_the_whole_palette() {
        let d = desktop(&[]);
        assert!(d.video().mode_set);
        assert_eq!(d.video().palette_writes, 256);
        assert_eq!(d.video().palette[0], (0, 63, 63, 63));
        assert_eq!(d.video().frames, 0);
    }

    #[test]
    fn first_tick_presents_and_idle_ticks_do_not() {
        let mut d = desktop(&[]);
        d.tick();
        assert_eq!(d.video().frames, 1);
        for _ in 0..100 {
            d.tick();
        }
        assert_eq!(d.video().frames, 1);
    }

    #[test]
    fn every_decoded_key_redraws() {
        let mut d = desktop(&[]);
        d.tick();
        // right arrow, then an unmapped code
        d.input_mut().push(&[0x4D, 0x3B]);
        d.tick();
        assert_eq!(d.video().frames, 2);
        d.tick();
        assert_eq!(d.video().frames, 2);
    }

    #[test]
    fn click_highlight_fades_out() {
        let mut d = desktop(&[]);
        d.tick();
        let files = d.layout.icon_rect(2).expect("files icon");
        d.session.input.cursor.x = files.x + 4;
        d.session.input.cursor.y = files.y + 4;
        d.input_mut().push(&[0x1C]);
        d.tick();
        assert_eq!(d.session().shell.highlighted(), Some(crate::config::DockIcon::Files));
        let before = d.video().frames;
        for _ in 0..CFG.timing.highlight_frames {
            d.tick();
        }
        assert_eq!(d.session().shell.highlight_frames, 0);
        assert!(d.video().frames > before);
        let settled = d.video().frames;
        d.tick();
        assert_eq!(d.video().frames, settled);
    }

    #[test]
    fn caret_blink_redraws_on_the_interval() {
        let mut d = desktop(&[]);
        d.session.shell.terminal_open = true;
        d.input_mut().push(&[0x0F]);
        d.tick();
        assert!(d.session().typing());
        let frames = d.video().frames;
        for _ in 0..CFG.timing.blink_interval - 1 {
            d.tick();
        }
        assert_eq!(d.video().frames, frames);
        assert!(d.session().caret_visible);
        d.tick();
        assert_eq!(d.video().frames, frames + 1);
        assert!(!d.session().caret_visible);
    }

    #[test]
    fn typed_command_shows_its_output() {
        let mut d = desktop(&[]);
        d.session.shell.terminal_open = true;
        // tab, "ls", enter
        d.input_mut().push(&[0x0F, 0x26, 0x1F, 0x1C]);
        assert_eq!(drain(&mut d), None);
        let lines: std::vec::Vec<&str> = d.session().terminal.lines().collect();
        assert_eq!(lines, ["> ls", "bin  docs  home", "readme.txt"]);
        assert_eq!(d.video().last_frame.len(), SCREEN_WIDTH * SCREEN_HEIGHT);
    }

    #[test]
    fn power_request_is_returned_after_the_frame() {
        let mut d = desktop(&[]);
        d.session.shell.terminal_open = true;
        // tab, "reboot", enter
        d.input_mut().push(&[0x0F, 0x13, 0x12, 0x30, 0x18, 0x18, 0x14]);
        drain(&mut d);
        let frames = d.video().frames;
        d.input_mut().push(&[0x1C]);
        assert_eq!(d.tick(), Some(PowerRequest::Reboot));
        assert_eq!(d.video().frames, frames + 1);
    }

    #[test]
    #[should_panic(expected = "power: halt")]
    fn run_hands_shutdown_to_the_power_control() {
        let mut d = desktop(&[]);
        d.session.shell.terminal_open = true;
        // tab, "shutdown", enter
        d.input_mut().push(&[0x0F, 0x1F, 0x23, 0x16, 0x14, 0x20, 0x18, 0x11, 0x31, 0x1C]);
        let mut d = *d;
        d.config = &TEST_CFG_FAST;
        d.run();
    }

    static TEST_CFG_FAST: ShellConfig = ShellConfig {
        timing: crate::config::Timing { idle_spins: 0, ..ShellConfig::DEFAULT.timing },
        ..ShellConfig::DEFAULT
    };
}
