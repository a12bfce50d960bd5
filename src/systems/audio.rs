//! Audio systems backed by a dedicated thread and Raylib.
//!
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio
//!   device, processes [`AudioCmd`] messages, and emits [`AudioMessage`]
//!   responses.
//! - [`poll_audio_messages`] / [`forward_audio_cmds`] bridge the crossbeam
//!   channels with the ECS message queues each frame.
//! - [`music_toggle`] pauses/resumes the background track on the music key.
//!
//! Raylib audio API calls stay isolated to the audio thread; the main thread
//! communicates only via lock-free channels. The thread must be created once
//! via [`crate::resources::audio::setup_audio`] and joined via
//! [`crate::resources::audio::shutdown_audio`].

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{error, info, warn};
use raylib::core::audio::{Music, RaylibAudio};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::game::MUSIC_ID;
use crate::resources::audio::{AudioBridge, MusicState};
use crate::resources::input::InputState;

/// Drain any pending messages from the audio thread into the ECS
/// [`Messages<AudioMessage>`] mailbox. Non-blocking, runs each frame.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut messages: ResMut<Messages<AudioMessage>>) {
    messages.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the bridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // Ignore send errors on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for [`AudioCmd`] so same-frame readers can
/// observe writes.
pub fn update_bevy_audio_cmds(mut messages: ResMut<Messages<AudioCmd>>) {
    messages.update();
}

/// Mirror audio thread messages into the [`MusicState`] resource.
pub fn track_music_state(
    mut reader: MessageReader<AudioMessage>,
    mut state: ResMut<MusicState>,
) {
    for msg in reader.read() {
        match msg {
            AudioMessage::MusicLoaded { .. } => state.loaded = true,
            AudioMessage::MusicLoadFailed { id, error: reason } => {
                warn!("music '{}' failed to load: {}", id, reason);
                state.loaded = false;
            }
            AudioMessage::MusicPlayStarted { .. } => state.playing = true,
            AudioMessage::MusicStopped { .. } | AudioMessage::MusicFinished { .. } => {
                state.playing = false
            }
        }
    }
}

/// Pause/resume the background track when the music key is pressed.
pub fn music_toggle(
    input: Res<InputState>,
    state: Res<MusicState>,
    mut writer: MessageWriter<AudioCmd>,
) {
    if !input.toggle_music.just_pressed || !state.loaded {
        return;
    }
    if state.playing {
        writer.write(AudioCmd::PauseMusic {
            id: MUSIC_ID.into(),
        });
    } else {
        writer.write(AudioCmd::ResumeMusic {
            id: MUSIC_ID.into(),
        });
    }
}

/// Entry point of the dedicated audio thread.
///
/// Owns all `Music` handles, reacts to [`AudioCmd`] inputs, emits
/// [`AudioMessage`] outputs, and pumps music streams while tracks are
/// playing. Blocks until it receives [`AudioCmd::Shutdown`].
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("Failed to initialize audio device: {}", e);
            return;
        }
    };

    info!("audio thread starting (id={:?})", std::thread::current().id());

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();

    'run: loop {
        // 1) Drain commands
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(music) => {
                        info!("[audio] loaded id='{}' path='{}'", id, path);
                        musics.insert(id.clone(), music);
                        let _ = tx_msg.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        error!("[audio] load failed id='{}' path='{}': {}", id, path, e);
                        let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayMusic {
                    id,
                    looped: want_loop,
                } => {
                    if let Some(music) = musics.get(&id) {
                        info!("[audio] play id='{}' looped={}", id, want_loop);
                        music.seek_stream(0.0);
                        music.play_stream();
                        playing.insert(id.clone());
                        if want_loop {
                            looped.insert(id.clone());
                        } else {
                            looped.remove(&id);
                        }
                        let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id });
                    }
                }
                AudioCmd::PauseMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        info!("[audio] pause id='{}'", id);
                        music.pause_stream();
                        playing.remove(&id);
                        let _ = tx_msg.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::ResumeMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        info!("[audio] resume id='{}'", id);
                        music.resume_stream();
                        playing.insert(id.clone());
                        let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id });
                    }
                }
                AudioCmd::Shutdown => {
                    info!("[audio] shutdown requested");
                    musics.clear();
                    playing.clear();
                    looped.clear();
                    break 'run;
                }
            }
        }

        // 2) Pump streaming + detect ends.
        //    `update_stream()` must be called regularly while playing.
        //    If a track ended and isn't looped, emit Finished exactly once.
        let mut ended: Vec<String> = Vec::new();
        for id in playing.iter() {
            if let Some(music) = musics.get(id) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else {
                    let len = music.get_time_length();
                    let played = music.get_time_played();
                    if played >= len - 0.01 {
                        ended.push(id.clone());
                    }
                }
            }
        }
        for id in ended.iter() {
            if looped.contains(id) {
                if let Some(music) = musics.get(id) {
                    music.seek_stream(0.0);
                    music.play_stream();
                    let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id: id.clone() });
                }
            } else {
                playing.remove(id);
                let _ = tx_msg.send(AudioMessage::MusicFinished { id: id.clone() });
            }
        }

        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    info!("audio thread exiting (id={:?})", std::thread::current().id());

    // On exit, musics drop before `audio`, satisfying lifetimes
}
