//! # Alarm state machine
//! The single authority over whether the alarm is going off, and the only place output commands
//! come from.
//!
//! ```text
//!              emergency press / noise
//!   Inactive ──────────────────────────► Active ──┐ emergency press / noise
//!      ▲                                   │  ◄───┘ (no change)
//!      └────────────── reset press ────────┘
//!   (reset from Inactive stays Inactive and still silences the outputs)
//! ```
//!
//! Transitions only flag the display as dirty, except reset which silences the siren and clears
//! the LEDs on the spot. Everything periodic happens in [`AlarmMachine::display_tick`] and
//! [`AlarmMachine::blink_tick`], gated by the [`Scheduler`].
use crate::pattern::LedPattern;
use crate::scheduler::Scheduler;
use crate::tone::ToneChannel;
use embassy_time::Instant;

/// Whether the alarm is going off
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmState {
    /// Quiet and ready
    Inactive,
    /// Blinking and sounding
    Active,
}

impl AlarmState {
    /// Check if the alarm is active
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// What raised the alarm
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// The emergency button was pressed
    EmergencyButton,
    /// The microphone picked up a level above the threshold
    Noise,
}

/// Status line shown on the display
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayText {
    /// Shown at startup and whenever the alarm is inactive
    Ready,
    /// Shown while the alarm is active
    AlarmActive,
}

impl DisplayText {
    /// The text for an alarm state
    pub const fn for_state(state: AlarmState) -> Self {
        match state {
            AlarmState::Inactive => Self::Ready,
            AlarmState::Active => Self::AlarmActive,
        }
    }

    /// The exact string put on the display
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "Sistema Pronto",
            Self::AlarmActive => "ALARME ATIVADO!",
        }
    }
}

/// An output the peripherals must carry out
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Show a pattern on the LED matrix
    Led(LedPattern),
    /// Switch one siren tone on or off
    Tone {
        /// The tone generator
        channel: ToneChannel,
        /// Energized or silent
        on: bool,
    },
    /// Replace the display contents with a status line
    Show(DisplayText),
}

/// Receiver of the commands emitted by the state machine.
///
/// Emitting is fire-and-forget: the state machine never learns whether a peripheral carried the
/// command out.
pub trait CommandSink {
    /// Hand over one command
    fn emit(&mut self, command: Command);
}

/// The alarm state machine with its periodic output state
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmMachine {
    /// Current alarm state
    state: AlarmState,
    /// The display is stale and must be redrawn on the next display tick
    display_dirty: bool,
    /// Current blink phase, `true` is the lit phase
    blink_phase: bool,
    /// The tone energized on the last blink tick, `None` before the first one
    siren_tone: Option<ToneChannel>,
    /// Display and blink timers
    scheduler: Scheduler,
}

impl AlarmMachine {
    /// A quiet machine for a system started at `start`. The display starts dirty so the ready
    /// text is drawn on the first display tick.
    pub const fn new(start: Instant) -> Self {
        Self {
            state: AlarmState::Inactive,
            display_dirty: true,
            blink_phase: false,
            siren_tone: None,
            scheduler: Scheduler::new(start),
        }
    }

    /// Current alarm state
    pub const fn state(&self) -> AlarmState {
        self.state
    }

    /// Check if the alarm is active
    pub const fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Whether the display waits for a redraw
    pub const fn is_display_dirty(&self) -> bool {
        self.display_dirty
    }

    /// Current blink phase, `true` is the lit phase
    pub const fn blink_phase(&self) -> bool {
        self.blink_phase
    }

    /// The tone energized on the last blink tick
    pub const fn siren_tone(&self) -> Option<ToneChannel> {
        self.siren_tone
    }

    /// The timers of the machine
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Raise the alarm. Returns `true` on an actual transition, `false` if it was already active,
    /// in which case nothing changes at all.
    fn activate(&mut self, trigger: Trigger) -> bool {
        if self.state.is_active() {
            debug!("Alarm already active, ignoring {:?}", trigger);
            return false;
        }
        info!("Alarm activated by {:?}", trigger);
        self.state = AlarmState::Active;
        self.display_dirty = true;
        true
    }

    /// Handle an emergency button press
    pub fn on_emergency(&mut self) -> bool {
        self.activate(Trigger::EmergencyButton)
    }

    /// Handle a noise detection
    pub fn on_noise(&mut self) -> bool {
        self.activate(Trigger::Noise)
    }

    /// Handle a reset button press.
    ///
    /// Always ends inactive with the LEDs cleared and both tones off, whatever the prior state.
    /// The outputs are commanded right away instead of waiting for a tick.
    pub fn on_reset(&mut self, sink: &mut impl CommandSink) {
        if self.state.is_active() {
            info!("Alarm reset");
        } else {
            debug!("Reset while inactive");
        }
        self.state = AlarmState::Inactive;
        sink.emit(Command::Led(LedPattern::Cleared));
        sink.emit(Command::Tone {
            channel: ToneChannel::A,
            on: false,
        });
        sink.emit(Command::Tone {
            channel: ToneChannel::B,
            on: false,
        });
        self.display_dirty = true;
    }

    /// Redraw the display if a display tick is due and the display is stale.
    ///
    /// A due tick is consumed even when there is nothing to redraw.
    pub fn display_tick(&mut self, now: Instant, sink: &mut impl CommandSink) {
        if !self.scheduler.display_tick_due(now) || !self.display_dirty {
            return;
        }
        let text = DisplayText::for_state(self.state);
        debug!("Display refresh: {}", text.as_str());
        sink.emit(Command::Show(text));
        self.display_dirty = false;
    }

    /// Advance the blink and siren if the alarm is active and a blink tick is due.
    ///
    /// While inactive the blink timer is not consulted at all, so its tick is not consumed.
    /// Every due tick flips the LEDs between the X pattern and dark, and switches the siren to
    /// the other tone, one tone on and the other off.
    pub fn blink_tick(&mut self, now: Instant, sink: &mut impl CommandSink) {
        if !self.state.is_active() || !self.scheduler.blink_tick_due(now) {
            return;
        }
        self.blink_phase = !self.blink_phase;
        let pattern = if self.blink_phase {
            LedPattern::Alarm
        } else {
            LedPattern::Cleared
        };
        let tone = self.siren_tone.map_or(ToneChannel::A, ToneChannel::other);
        trace!("Blink {:?}, siren {:?}", pattern, tone);
        sink.emit(Command::Led(pattern));
        sink.emit(Command::Tone {
            channel: tone,
            on: true,
        });
        sink.emit(Command::Tone {
            channel: tone.other(),
            on: false,
        });
        self.siren_tone = Some(tone);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records everything emitted, in order
    #[derive(Debug, Default)]
    pub(crate) struct Recorder(pub(crate) Vec<Command>);

    impl CommandSink for Recorder {
        fn emit(&mut self, command: Command) {
            self.0.push(command);
        }
    }

    impl Recorder {
        /// Hand out what was recorded so far and start over
        pub(crate) fn drain(&mut self) -> Vec<Command> {
            core::mem::take(&mut self.0)
        }
    }

    pub(crate) const fn tone(channel: ToneChannel, on: bool) -> Command {
        Command::Tone { channel, on }
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn silenced() -> Vec<Command> {
        vec![
            Command::Led(LedPattern::Cleared),
            tone(ToneChannel::A, false),
            tone(ToneChannel::B, false),
        ]
    }

    #[test]
    fn starts_inactive_with_ready_text_pending() {
        let mut machine = AlarmMachine::new(at(0));
        let mut out = Recorder::default();
        assert_eq!(machine.state(), AlarmState::Inactive);
        assert!(machine.is_display_dirty());

        machine.display_tick(at(101), &mut out);
        assert_eq!(out.drain(), vec![Command::Show(DisplayText::Ready)]);
        assert!(!machine.is_display_dirty());
    }

    #[test]
    fn display_texts_are_exact() {
        assert_eq!(DisplayText::Ready.as_str(), "Sistema Pronto");
        assert_eq!(DisplayText::AlarmActive.as_str(), "ALARME ATIVADO!");
        assert_eq!(DisplayText::for_state(AlarmState::Active), DisplayText::AlarmActive);
        assert_eq!(DisplayText::for_state(AlarmState::Inactive), DisplayText::Ready);
    }

    #[test]
    fn noise_activates_and_next_display_tick_shows_alarm() {
        let mut machine = AlarmMachine::new(at(0));
        let mut out = Recorder::default();
        machine.display_tick(at(101), &mut out);
        out.drain();

        assert!(machine.on_noise());
        assert!(machine.is_active());
        assert!(machine.is_display_dirty());
        assert!(out.0.is_empty());

        machine.display_tick(at(202), &mut out);
        assert_eq!(out.drain(), vec![Command::Show(DisplayText::AlarmActive)]);
    }

    #[test]
    fn activation_while_active_changes_nothing() {
        let mut machine = AlarmMachine::new(at(0));
        let mut out = Recorder::default();
        assert!(machine.on_emergency());
        machine.display_tick(at(101), &mut out);
        assert!(!machine.is_display_dirty());
        let before = machine;

        assert!(!machine.on_emergency());
        assert!(!machine.on_noise());
        assert_eq!(machine, before);
        assert!(!machine.is_display_dirty());
    }

    #[test]
    fn reset_silences_outputs_immediately_from_any_state() {
        let mut active = AlarmMachine::new(at(0));
        let mut out = Recorder::default();
        active.on_emergency();
        active.blink_tick(at(1_000), &mut out);
        out.drain();

        active.on_reset(&mut out);
        assert_eq!(active.state(), AlarmState::Inactive);
        assert!(active.is_display_dirty());
        assert_eq!(out.drain(), silenced());

        let mut inactive = AlarmMachine::new(at(0));
        inactive.on_reset(&mut out);
        assert_eq!(inactive.state(), AlarmState::Inactive);
        assert_eq!(out.drain(), silenced());
    }

    #[test]
    fn display_tick_is_consumed_even_when_clean() {
        let mut machine = AlarmMachine::new(at(0));
        let mut out = Recorder::default();
        machine.display_tick(at(101), &mut out);
        machine.display_tick(at(202), &mut out);
        assert_eq!(machine.scheduler().last_display_refresh(), at(202));

        // dirtied right after a consumed tick, has to wait for the next one
        machine.on_emergency();
        out.drain();
        machine.display_tick(at(250), &mut out);
        assert!(out.0.is_empty());
        machine.display_tick(at(303), &mut out);
        assert_eq!(out.drain(), vec![Command::Show(DisplayText::AlarmActive)]);
    }

    #[test]
    fn blink_alternates_phase_and_siren() {
        let mut machine = AlarmMachine::new(at(0));
        let mut out = Recorder::default();
        machine.on_emergency();

        machine.blink_tick(at(1_000), &mut out);
        assert!(machine.blink_phase());
        assert_eq!(
            out.drain(),
            vec![
                Command::Led(LedPattern::Alarm),
                tone(ToneChannel::A, true),
                tone(ToneChannel::B, false),
            ]
        );

        // the dark phase switches the siren too
        machine.blink_tick(at(1_501), &mut out);
        assert!(!machine.blink_phase());
        assert_eq!(
            out.drain(),
            vec![
                Command::Led(LedPattern::Cleared),
                tone(ToneChannel::B, true),
                tone(ToneChannel::A, false),
            ]
        );
        assert_eq!(machine.siren_tone(), Some(ToneChannel::B));

        machine.blink_tick(at(2_002), &mut out);
        assert!(machine.blink_phase());
        assert_eq!(
            out.drain(),
            vec![
                Command::Led(LedPattern::Alarm),
                tone(ToneChannel::A, true),
                tone(ToneChannel::B, false),
            ]
        );
    }

    #[test]
    fn blink_waits_for_its_interval() {
        let mut machine = AlarmMachine::new(at(0));
        let mut out = Recorder::default();
        machine.on_noise();
        machine.blink_tick(at(1_000), &mut out);
        out.drain();

        machine.blink_tick(at(1_100), &mut out);
        machine.blink_tick(at(1_500), &mut out);
        assert!(out.0.is_empty());
        assert!(machine.blink_phase());
    }

    #[test]
    fn inactive_machine_does_not_blink_or_consume_blink_ticks() {
        let mut machine = AlarmMachine::new(at(0));
        let mut out = Recorder::default();
        machine.blink_tick(at(1_000), &mut out);
        assert!(out.0.is_empty());
        assert!(!machine.blink_phase());
        assert_eq!(machine.scheduler().last_blink(), Instant::MIN);
    }

    #[test]
    fn every_blink_tick_energizes_exactly_one_tone() {
        let mut machine = AlarmMachine::new(at(0));
        let mut out = Recorder::default();
        machine.on_emergency();

        let mut tone_a = false;
        let mut tone_b = false;
        let mut last_phase = machine.blink_phase();
        let mut last_tone = machine.siren_tone();
        for tick in 1..=20u64 {
            machine.blink_tick(at(tick * 501), &mut out);
            assert_ne!(machine.blink_phase(), last_phase, "tick {tick}");
            assert_ne!(machine.siren_tone(), last_tone, "tick {tick}");
            last_phase = machine.blink_phase();
            last_tone = machine.siren_tone();

            for command in out.drain() {
                if let Command::Tone { channel, on } = command {
                    match channel {
                        ToneChannel::A => tone_a = on,
                        ToneChannel::B => tone_b = on,
                    }
                }
            }
            assert!(tone_a ^ tone_b, "tick {tick}");
        }
    }

    #[test]
    fn blink_and_siren_resume_where_they_left_off_after_reset() {
        let mut machine = AlarmMachine::new(at(0));
        let mut out = Recorder::default();
        machine.on_emergency();
        machine.blink_tick(at(1_000), &mut out);
        machine.on_reset(&mut out);
        out.drain();

        machine.on_emergency();
        machine.blink_tick(at(3_000), &mut out);
        // lit phase was left on, so the first step after re-activation is the dark one
        assert!(!machine.blink_phase());
        assert_eq!(
            out.drain(),
            vec![
                Command::Led(LedPattern::Cleared),
                tone(ToneChannel::B, true),
                tone(ToneChannel::A, false),
            ]
        );

        machine.blink_tick(at(3_501), &mut out);
        assert_eq!(
            out.drain(),
            vec![
                Command::Led(LedPattern::Alarm),
                tone(ToneChannel::A, true),
                tone(ToneChannel::B, false),
            ]
        );
    }

    #[test]
    fn siren_sounds_on_first_tick_after_reactivation() {
        let mut machine = AlarmMachine::new(at(0));
        let mut out = Recorder::default();
        machine.on_noise();
        machine.blink_tick(at(1_000), &mut out);
        machine.on_reset(&mut out);
        assert_eq!(out.drain().last(), Some(&tone(ToneChannel::B, false)));

        machine.on_emergency();
        machine.blink_tick(at(2_000), &mut out);
        let energized: Vec<_> = out
            .drain()
            .into_iter()
            .filter(|command| matches!(command, Command::Tone { on: true, .. }))
            .collect();
        assert_eq!(energized.len(), 1);
    }
}
