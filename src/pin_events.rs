//! Pin event router.
//!
//! Owns the subscription registry for edge/pulse/touch events on the GPIO
//! table pins and the PIN_EVENT channel's reusable frame.
//!
//! ```text
//!  SET_EVENT ──▶ set_event_type ──▶ EventBusPort::subscribe (DropIfBusy)
//!                                  PinPort::set_event_detection
//!
//!  host bus ──▶ on_pin_event ──▶ PIN_EVENT frame ──▶ NotifySink
//! ```
//!
//! Subscriptions use the host's drop-if-busy delivery: a pin event that
//! arrives while the previous one is still being handled is discarded
//! rather than queued, so a burst on one pin cannot overwrite a frame the
//! transport has not read yet.

use log::debug;

use crate::app::events::{HostEvent, NotifyChannel};
use crate::app::ports::{DeliveryPolicy, EventBusPort, Listener, NotifySink, PinPort};
use crate::pins::{self, GPIO_PINS};
use crate::protocol::command::PinEventType;
use crate::protocol::events::encode_pin_event;
use crate::protocol::frame::NotificationFrame;

pub struct PinEventRouter {
    /// Active detection mode per [`GPIO_PINS`] slot.
    subscriptions: [Option<PinEventType>; GPIO_PINS.len()],
    frame: NotificationFrame,
}

impl PinEventRouter {
    pub const fn new() -> Self {
        Self {
            subscriptions: [None; GPIO_PINS.len()],
            frame: NotificationFrame::new(),
        }
    }

    /// Subscribe `pin` for `event`, or unsubscribe it with
    /// [`PinEventType::None`].  Pins outside the table are ignored.
    pub fn set_event_type(
        &mut self,
        pin: u8,
        event: PinEventType,
        hw: &mut (impl PinPort + EventBusPort),
    ) {
        let (Some(slot), Some(component)) = (slot_of(pin), pins::component_id(pin)) else {
            debug!("pin event request on P{} ignored: not routable", pin);
            return;
        };

        if event == PinEventType::None {
            if self.subscriptions[slot].take().is_some() {
                hw.unsubscribe(component, Listener::PinEvent);
                debug!("P{} pin events unsubscribed", pin);
            }
            hw.set_event_detection(pin, PinEventType::None);
            return;
        }

        if self.subscriptions[slot].is_none() {
            hw.subscribe(component, Listener::PinEvent, DeliveryPolicy::DropIfBusy);
        }
        self.subscriptions[slot] = Some(event);
        hw.set_event_detection(pin, event);
        debug!("P{} pin events subscribed ({:?})", pin, event);
    }

    /// Encode a delivered pin event and signal the transport.  Returns
    /// `false` if the source is not a routable pin.
    pub fn on_pin_event(&mut self, event: &HostEvent, sink: &mut impl NotifySink) -> bool {
        let Some(pin) = pins::pin_for_component(event.source) else {
            debug!("pin event from unknown component {} dropped", event.source);
            return false;
        };
        encode_pin_event(&mut self.frame, pin, event);
        sink.notify(NotifyChannel::PinEvent, &self.frame);
        true
    }

    /// Drop every subscription and disable detection on its pin.
    pub fn unsubscribe_all(&mut self, hw: &mut (impl PinPort + EventBusPort)) {
        for (slot, pin) in GPIO_PINS.iter().enumerate() {
            if self.subscriptions[slot].take().is_some() {
                if let Some(component) = pins::component_id(*pin) {
                    hw.unsubscribe(component, Listener::PinEvent);
                }
                hw.set_event_detection(*pin, PinEventType::None);
            }
        }
    }

    pub fn subscription(&self, pin: u8) -> Option<PinEventType> {
        slot_of(pin).and_then(|slot| self.subscriptions[slot])
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.iter().flatten().count()
    }

    pub fn frame(&self) -> &NotificationFrame {
        &self.frame
    }
}

impl Default for PinEventRouter {
    fn default() -> Self {
        Self::new()
    }
}

fn slot_of(pin: u8) -> Option<usize> {
    GPIO_PINS.iter().position(|&p| p == pin)
}
