//! Event Dispatcher
//!
//! Sends one event to an ordered list of subscribers and folds their answers
//! into a single boolean. Any subscriber answering `false` vetoes the event.
//!
//! How a single subscriber is reached is delegated to an [`EventSender`]:
//! [`HandlerSender`] calls the plugin's [`EventHandler`], [`NullSender`]
//! accepts without calling anything.
//!
//! [`EventHandler`]: crate::plugin::traits::EventHandler

use crate::plugin::collection::Subscriber;
use crate::plugin::error::PluginResult;
use crate::plugin::types::{EventArgs, MethodConfiguration};
use log::{debug, trace};
use strum_macros::{Display, EnumString};

/// What happens after a subscriber vetoes an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DispatchPolicy {
    /// Every subscriber is notified; the veto only affects the result
    #[default]
    NotifyAll,
    /// Remaining subscribers are skipped after the first veto
    StopOnVeto,
}

/// Delivers an event to one subscriber
pub trait EventSender {
    fn send(
        &mut self,
        subscriber: &mut Subscriber<'_>,
        event: &MethodConfiguration,
        args: &EventArgs,
    ) -> PluginResult<bool>;
}

/// Accepts every event without invoking the plugin
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSender;

impl EventSender for NullSender {
    fn send(
        &mut self,
        _subscriber: &mut Subscriber<'_>,
        _event: &MethodConfiguration,
        _args: &EventArgs,
    ) -> PluginResult<bool> {
        Ok(true)
    }
}

/// Invokes the subscriber's handler if it supports the event
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlerSender;

impl EventSender for HandlerSender {
    fn send(
        &mut self,
        subscriber: &mut Subscriber<'_>,
        event: &MethodConfiguration,
        args: &EventArgs,
    ) -> PluginResult<bool> {
        let event_name = event.method_name();
        if !subscriber.handler.supports(event_name) {
            debug!(
                "Dispatcher: '{}' does not implement '{}', skipped",
                subscriber.id, event_name
            );
            return Ok(true);
        }
        subscriber.handler.handle(event_name, args)
    }
}

/// Runs events against subscriber lists and remembers what it dispatched
#[derive(Debug)]
pub struct Dispatcher<S: EventSender = HandlerSender> {
    sender: S,
    policy: DispatchPolicy,
    first_event: Option<String>,
    last_event: Option<String>,
    last_result: Option<bool>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::with_sender(HandlerSender)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSender> Dispatcher<S> {
    pub fn with_sender(sender: S) -> Self {
        Self {
            sender,
            policy: DispatchPolicy::default(),
            first_event: None,
            last_event: None,
            last_result: None,
        }
    }

    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Send `event` to `subscribers` in the order given
    ///
    /// Returns `true` unless a subscriber vetoed; no subscribers means `true`.
    /// A handler error is returned as-is; `last_result` then keeps its
    /// previous value while `last_event` already names this event.
    pub fn send_event<'a, I>(
        &mut self,
        subscribers: I,
        event: &MethodConfiguration,
        args: &EventArgs,
    ) -> PluginResult<bool>
    where
        I: IntoIterator<Item = Subscriber<'a>>,
    {
        let event_name = event.method_name();
        if self.first_event.is_none() {
            self.first_event = Some(event_name.to_string());
        }
        self.last_event = Some(event_name.to_string());

        let mut result = true;
        let mut notified = 0usize;
        for mut subscriber in subscribers {
            if !result && self.policy == DispatchPolicy::StopOnVeto {
                debug!(
                    "Dispatcher: '{}' vetoed, remaining subscribers skipped",
                    event_name
                );
                break;
            }

            trace!("Dispatcher: '{}' -> '{}'", event_name, subscriber.id);
            let accepted = self.sender.send(&mut subscriber, event, args)?;
            notified += 1;
            if !accepted {
                debug!(
                    "Dispatcher: '{}' vetoed by '{}'",
                    event_name, subscriber.id
                );
                result = false;
            }
        }

        debug!(
            "Dispatcher: '{}' sent to {} subscriber(s), result {}",
            event_name, notified, result
        );
        self.last_result = Some(result);
        Ok(result)
    }

    /// Name of the first event this dispatcher sent
    pub fn first_event(&self) -> Option<&str> {
        self.first_event.as_deref()
    }

    /// Name of the most recent event
    pub fn last_event(&self) -> Option<&str> {
        self.last_event.as_deref()
    }

    /// Result of the most recently completed dispatch
    pub fn last_result(&self) -> Option<bool> {
        self.last_result
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: DispatchPolicy) {
        self.policy = policy;
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }
}
