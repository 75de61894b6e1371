//! # Orchestrate Task
//! The main loop of the alarm: sample the microphone, run one cycle of the alarm core, sleep.
//!
//! Commands coming out of the core are routed to the peripherals here. Tones are switched in
//! place, LED patterns and status lines are handed to their tasks.
use crate::task::{
    buttons::{EMERGENCY_BUTTON, RESET_BUTTON},
    display::signal_display_text,
    led_matrix::signal_led_pattern,
    microphone::Microphone,
    siren::Siren,
};
use alarm_core::{AlarmLoop, Buttons, Command, CommandSink, POLL_INTERVAL};
use defmt::{info, trace};
use embassy_time::{Instant, Timer};

/// Routes core commands to the peripherals
struct Outputs<'a> {
    /// The siren, switched synchronously
    siren: &'a mut Siren,
}

impl CommandSink for Outputs<'_> {
    fn emit(&mut self, command: Command) {
        trace!("Command: {}", command);
        match command {
            Command::Led(pattern) => signal_led_pattern(pattern),
            Command::Tone { channel, on } => self.siren.set(channel, on),
            Command::Show(text) => signal_display_text(text),
        }
    }
}

/// This task owns the alarm state and drives it at a fixed cadence. It acts as the main task of
/// the system.
#[embassy_executor::task]
pub async fn orchestrator(mut microphone: Microphone, mut siren: Siren) {
    info!("Orchestrate task started");
    let mut alarm = AlarmLoop::new(Instant::now());
    let buttons = Buttons {
        emergency: &EMERGENCY_BUTTON,
        reset: &RESET_BUTTON,
    };

    loop {
        let noise_level = microphone.level().await;
        let was_active = alarm.machine().is_active();

        alarm.cycle(
            Instant::now(),
            noise_level,
            buttons,
            &mut Outputs { siren: &mut siren },
        );

        let state = alarm.machine().state();
        if state.is_active() != was_active {
            info!("Alarm state: {}, noise level {}", state, noise_level);
        }

        Timer::after(POLL_INTERVAL).await;
    }
}
