//! Bridge service: the hexagonal core.
//!
//! [`BridgeService`] owns every piece of device-lifetime state: the pull-mode
//! table, both sample rings, the shared registers, the shadow display grid,
//! the pin-event subscription registry and the reusable notification
//! frames.  All I/O flows through port traits injected at call sites.
//!
//! ```text
//!  command bytes ──▶ ┌────────────────────────────┐ ──▶ PinPort / DisplayPort
//!                    │        BridgeService        │ ──▶ EventBusPort
//!  host events   ──▶ │ dispatch · router · shadow  │ ──▶ NotifySink
//!  scheduler     ──▶ │ telemetry · registers       │ ◀── SensorPort
//!                    └────────────────────────────┘
//! ```
//!
//! The command path is permissive: the transport has no error channel, so a
//! frame that does not decode, or names a pin the action cannot use, is
//! logged and dropped.

use core::fmt::Write as _;

use log::{debug, info};

use crate::config::{BridgeConfig, Capabilities, HalGeneration};
use crate::display::ShadowDisplayBuffer;
use crate::error::{FrameError, Result};
use crate::pin_events::PinEventRouter;
use crate::pins::{self, GPIO_PINS, ID_BUTTON_A, ID_BUTTON_B, ID_GESTURE, INITIAL_PULL_UP_PINS};
use crate::protocol::command::{Command, PinEventType, PullMode};
use crate::protocol::events::{encode_button, encode_gesture};
use crate::protocol::frame::NotificationFrame;
use crate::protocol::telemetry::{TelemetryEncoder, convert_to_tilt};
use crate::pull::PullModeTable;
use crate::registers::SharedRegisterStore;

use super::events::{Button, HostEvent, NotifyChannel};
use super::ports::{DeliveryPolicy, DisplayPort, EventBusPort, Listener, NotifySink, PinPort, SensorPort};

// ───────────────────────────────────────────────────────────────
// BridgeService
// ───────────────────────────────────────────────────────────────

pub struct BridgeService {
    config: BridgeConfig,
    pulls: PullModeTable,
    router: PinEventRouter,
    shadow: ShadowDisplayBuffer,
    registers: SharedRegisterStore,
    telemetry: TelemetryEncoder,
    /// Reusable frame of the ACTION_EVENT channel.
    action_frame: NotificationFrame,
}

impl BridgeService {
    pub fn new(config: BridgeConfig) -> Self {
        let telemetry = TelemetryEncoder::new(config.capabilities);
        Self {
            config,
            pulls: PullModeTable::new(),
            router: PinEventRouter::new(),
            shadow: ShadowDisplayBuffer::new(),
            registers: SharedRegisterStore::new(),
            telemetry,
            action_frame: NotificationFrame::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Prepare the compass and subscribe the button and gesture sources.
    ///
    /// On DAL boards, holding button A at start clears a bad compass
    /// calibration.
    pub fn start(&mut self, hw: &mut (impl SensorPort + EventBusPort)) {
        if self.config.capabilities.clears_compass_on_button_a() && hw.is_button_pressed(Button::A)
        {
            info!("button A held at start, clearing compass calibration");
            hw.clear_compass_calibration();
        }
        if !hw.is_compass_calibrated() {
            info!("compass not calibrated, calibrating");
            hw.calibrate_compass();
        }

        hw.subscribe(ID_BUTTON_A, Listener::Button, DeliveryPolicy::Immediate);
        hw.subscribe(ID_BUTTON_B, Listener::Button, DeliveryPolicy::Immediate);
        hw.subscribe(ID_GESTURE, Listener::Gesture, DeliveryPolicy::Immediate);
        info!(
            "BridgeService started ({:?}, analog max {})",
            self.config.capabilities.generation, self.config.capabilities.analog_max
        );
    }

    /// Session-open pin setup: P0–P2 pulled up like the standard extension,
    /// then the ready glyph.
    pub fn initial_configuration(&mut self, hw: &mut (impl PinPort + DisplayPort)) {
        for pin in INITIAL_PULL_UP_PINS {
            self.pulls.apply(pin, PullMode::Up, hw);
        }
        hw.stop_animation();
        hw.print_char(self.config.ready_glyph);
        info!("initial configuration applied");
    }

    /// Session-close pin setup: every GPIO back to pull-none.
    ///
    /// DAL runs out of memory doing this, so it only stops the display
    /// there.
    pub fn release_configuration(&mut self, hw: &mut (impl PinPort + DisplayPort)) {
        hw.stop_animation();
        if self.config.capabilities.generation == HalGeneration::Codal {
            for pin in GPIO_PINS {
                self.pulls.apply(pin, PullMode::None, hw);
            }
        }
        info!("release configuration applied");
    }

    /// Scroll `"<name> -M <version>- "` as the pairing hint.
    pub fn display_friendly_name(&self, display: &mut impl DisplayPort) {
        let mut text: heapless::String<48> = heapless::String::new();
        // Capacity covers the longest name and version the config allows.
        let _ = write!(
            text,
            "{} -M {}- ",
            self.config.friendly_name, self.config.version
        );
        display.scroll_text(&text, self.config.name_scroll_delay_ms);
    }

    /// Drop every host subscription this service made.
    pub fn shutdown(&mut self, hw: &mut (impl PinPort + EventBusPort)) {
        hw.unsubscribe(ID_BUTTON_A, Listener::Button);
        hw.unsubscribe(ID_BUTTON_B, Listener::Button);
        hw.unsubscribe(ID_GESTURE, Listener::Gesture);
        self.router.unsubscribe_all(hw);
        info!("BridgeService shut down");
    }

    // ── Command dispatch ──────────────────────────────────────

    /// Decode and apply one inbound command frame.  Never fails: anything
    /// that does not decode is a no-op.
    pub fn handle_command(
        &mut self,
        data: &[u8],
        hw: &mut (impl PinPort + DisplayPort + EventBusPort),
    ) {
        match Command::parse(data) {
            Ok(cmd) => self.apply(cmd, hw),
            Err(e) => debug!("command dropped: {}", e),
        }
    }

    fn apply(&mut self, cmd: Command, hw: &mut (impl PinPort + DisplayPort + EventBusPort)) {
        match cmd {
            Command::ScrollText { text, delay_ms } => {
                hw.stop_animation();
                hw.scroll_text(&text, delay_ms);
            }
            Command::PixelsHead(rows) => self.shadow.write_head(&rows),
            Command::PixelsTail(rows) => {
                self.shadow.write_tail(&rows, hw);
            }
            Command::SetOutput { pin, level } => hw.set_digital_value(pin, level),
            Command::SetPwm { pin, duty } => {
                hw.set_analog_value(pin, duty.min(self.config.capabilities.analog_max));
            }
            Command::SetServo { pin, write } => hw.set_servo(pin, write),
            Command::SetPull { pin, mode } => self.pulls.apply(pin, mode, hw),
            Command::SetEvent { pin, event } => self.router.set_event_type(pin, event, hw),
            Command::SetTouch { pin } => hw.enable_touch(pin),
            Command::SetSharedData { index, value } => {
                // Rejection is logged by the store.
                let _ = self.registers.set(usize::from(index), i32::from(value));
            }
        }
    }

    // ── Host events ───────────────────────────────────────────

    /// Route a message-bus event to its encoder by source component.
    pub fn on_host_event(&mut self, event: &HostEvent, sink: &mut impl NotifySink) {
        match event.source {
            ID_BUTTON_A | ID_BUTTON_B => self.on_button_event(event, sink),
            ID_GESTURE => self.on_gesture_event(event, sink),
            _ => {
                self.router.on_pin_event(event, sink);
            }
        }
    }

    pub fn on_button_event(&mut self, event: &HostEvent, sink: &mut impl NotifySink) {
        encode_button(&mut self.action_frame, event);
        sink.notify(NotifyChannel::ActionEvent, &self.action_frame);
    }

    pub fn on_gesture_event(&mut self, event: &HostEvent, sink: &mut impl NotifySink) {
        encode_gesture(&mut self.action_frame, event);
        sink.notify(NotifyChannel::ActionEvent, &self.action_frame);
    }

    pub fn on_pin_event(&mut self, event: &HostEvent, sink: &mut impl NotifySink) -> bool {
        self.router.on_pin_event(event, sink)
    }

    // ── Telemetry (scheduler driven) ──────────────────────────

    pub fn sample_digital_and_environment(
        &mut self,
        buf: &mut [u8],
        hw: &mut (impl PinPort + SensorPort),
    ) -> core::result::Result<(), FrameError> {
        self.telemetry.sample_digital_and_environment(buf, hw)
    }

    pub fn sample_orientation(
        &self,
        buf: &mut [u8],
        sensors: &mut impl SensorPort,
    ) -> core::result::Result<(), FrameError> {
        self.telemetry.sample_orientation(buf, sensors)
    }

    pub fn sample_analog_pin(
        &mut self,
        buf: &mut [u8],
        pin: u8,
        hw: &mut impl PinPort,
    ) -> core::result::Result<Option<u16>, FrameError> {
        self.telemetry.sample_analog_pin(buf, pin, hw, &self.pulls)
    }

    pub fn pitch_tilt(&self, sensors: &mut impl SensorPort) -> i32 {
        convert_to_tilt(sensors.pitch_radians())
    }

    pub fn roll_tilt(&self, sensors: &mut impl SensorPort) -> i32 {
        convert_to_tilt(sensors.roll_radians())
    }

    // ── Shared registers ──────────────────────────────────────

    pub fn shared_register(&self, index: usize) -> Result<i16> {
        self.registers.get(index)
    }

    pub fn set_shared_register(&mut self, index: usize, value: i32) -> Result<()> {
        self.registers.set(index, value)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn capabilities(&self) -> Capabilities {
        self.config.capabilities
    }

    pub fn pull_mode(&self, pin: u8) -> PullMode {
        self.pulls.get(pin)
    }

    pub fn pin_subscription(&self, pin: u8) -> Option<PinEventType> {
        self.router.subscription(pin)
    }

    pub fn pin_subscription_count(&self) -> usize {
        self.router.subscription_count()
    }

    pub fn shadow_grid(&self) -> &[[u8; 5]; 5] {
        self.shadow.grid()
    }

    pub fn pin_event_frame(&self) -> &NotificationFrame {
        self.router.frame()
    }

    pub fn action_event_frame(&self) -> &NotificationFrame {
        &self.action_frame
    }

    /// Whether `pin` can carry event subscriptions.
    pub fn is_event_pin(pin: u8) -> bool {
        pins::component_id(pin).is_some()
    }
}
