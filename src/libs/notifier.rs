//! User-facing alerts raised when a timer interval ends.

use crate::libs::data_storage::APP_NAME;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_warning};
use notify_rust::{Notification as DesktopNotification, Timeout};
use parking_lot::Mutex;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Sound theme name handed to the notification server when no player runs.
const SOUND_NAME: &str = "alarm-clock-elapsed";

/// Audio players tried in order, each with the sound file it plays.
#[cfg(target_os = "macos")]
const SOUND_PLAYERS: &[(&str, &str)] = &[("afplay", "/System/Library/Sounds/Glass.aiff")];
#[cfg(not(target_os = "macos"))]
const SOUND_PLAYERS: &[(&str, &str)] = &[
    ("paplay", "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga"),
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
    ("aplay", "/usr/share/sounds/generic.wav"),
];

/// Content of a single alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// True when the timer has no further work.
    pub is_final: bool,
}

/// Delivers alerts; delivery is fire-and-forget.
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

/// Desktop notification with an optional sound.
///
/// The sound is played by an external audio player so that it is heard from
/// a detached waker, whose stdout goes nowhere. Without a usable player the
/// notification carries a sound name instead and the terminal bell rings.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    sound: bool,
}

impl DesktopNotifier {
    pub fn new(sound: bool) -> Self {
        Self { sound }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &Notification) {
        // Final alerts stay up until dismissed.
        let timeout = if notification.is_final { Timeout::Never } else { Timeout::Milliseconds(10_000) };

        let mut desktop = DesktopNotification::new();
        desktop
            .summary(&notification.title)
            .body(&notification.body)
            .appname(APP_NAME)
            .icon("alarm-clock")
            .timeout(timeout);

        if self.sound && !play_sound() {
            desktop.sound_name(SOUND_NAME);
            ring_bell();
        }

        match desktop.show() {
            Ok(_) => msg_debug!(format!("Notification shown: {}", notification.title)),
            Err(e) => msg_warning!(Message::NotificationFailed(e.to_string())),
        }
    }
}

/// First player whose sound file is present.
fn sound_player(exists: impl Fn(&Path) -> bool) -> Option<(&'static str, &'static str)> {
    SOUND_PLAYERS.iter().copied().find(|(_, file)| exists(Path::new(file)))
}

/// Starts an audio player in the background; false when none could start.
fn play_sound() -> bool {
    let Some((player, file)) = sound_player(Path::exists) else {
        return false;
    };

    match Command::new(player).arg(file).stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null()).spawn() {
        Ok(_) => true,
        Err(e) => {
            msg_debug!(format!("Failed to start {}: {}", player, e));
            false
        }
    }
}

fn ring_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

/// Notifier that keeps alerts in memory instead of showing them.
#[derive(Debug, Default)]
pub struct SilentNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl SilentNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }
}

impl Notifier for SilentNotifier {
    fn notify(&self, notification: &Notification) {
        self.sent.lock().push(notification.clone());
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: &Notification) {
        (**self).notify(notification)
    }
}
