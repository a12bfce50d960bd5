//! Headless integration tests for the player controller, camera, collision,
//! and music toggle systems. No window or audio device is created; the ECS
//! schedules run against a plain `World`.

#![allow(dead_code)]

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use hashnimals::components::boxcollider::BoxCollider;
use hashnimals::components::group::Group;
use hashnimals::components::mapposition::MapPosition;
use hashnimals::components::player::{Facing, Player, WALK_FRAMES};
use hashnimals::components::sprite::Sprite;
use hashnimals::components::zindex::ZIndex;
use hashnimals::error::GameError;
use hashnimals::events::audio::{AudioCmd, AudioMessage};
use hashnimals::events::clearoverlay::{ClearOverlayEvent, clear_overlay_observer};
use hashnimals::events::switchdebug::{SwitchDebugEvent, switch_debug_observer};
use hashnimals::game::start_music;
use hashnimals::resources::audio::{AudioBridge, MusicState};
use hashnimals::resources::camera::{CameraView, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
use hashnimals::resources::collisiongrid::CollisionGrid;
use hashnimals::resources::debugmode::DebugMode;
use hashnimals::resources::debugoverlay::DebugOverlay;
use hashnimals::resources::input::InputState;
use hashnimals::resources::gameconfig::GameConfig;
use hashnimals::resources::tilemap::Tilemap;
use hashnimals::systems::camera::{camera_follow, camera_zoom};
use hashnimals::systems::player::player_controller;
use hashnimals::systems::audio::music_toggle;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(grid: CollisionGrid) -> World {
    let mut world = World::new();
    world.insert_resource(InputState::default());
    world.insert_resource(DebugOverlay::default());
    world.insert_resource(CameraView::new(1000.0, 480.0, 1.5));
    world.insert_resource(grid);
    world.init_resource::<Messages<AudioCmd>>();
    world.insert_resource(MusicState::default());
    world
}

fn open_world() -> World {
    make_world(CollisionGrid::empty(16, 16, 48.0))
}

fn spawn_player_at(world: &mut World, x: f32, y: f32) -> Entity {
    let player = Player::new(3.0, 48.0);
    let sprite = Sprite::new("player-sheet", 48.0, 48.0).with_offset(player.frame_offset());
    world
        .spawn((
            Group::new("player"),
            MapPosition::new(x, y),
            ZIndex(0),
            sprite,
            BoxCollider::new(48.0, 48.0),
            player,
        ))
        .id()
}

fn tick_controller(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(player_controller);
    schedule.run(world);
}

fn tick_camera(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((camera_follow, camera_zoom));
    schedule.run(world);
}

fn tick_music_toggle(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(music_toggle);
    schedule.run(world);
}

fn position_of(world: &mut World, entity: Entity) -> Vector2 {
    world.get::<MapPosition>(entity).unwrap().pos
}

/// Map with a wall column at cell x=4 (world x 192..240), rows 0..=15.
fn walled_world() -> World {
    let mut src = String::from("tilesize 48\nwidth 16\nheight 16\nlayer collision\n");
    for _ in 0..16 {
        src.push_str(". . . . 1 . . . . . . . . . . .\n");
    }
    let map = Tilemap::from_text(&src).unwrap();
    make_world(CollisionGrid::from_tilemap(&map))
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

#[test]
fn walking_right_moves_speed_pixels_per_tick() {
    let mut world = open_world();
    let player = spawn_player_at(&mut world, 100.0, 100.0);
    world.resource_mut::<InputState>().direction_right.active = true;

    for _ in 0..10 {
        tick_controller(&mut world);
    }

    let pos = position_of(&mut world, player);
    assert!(approx_eq(pos.x, 130.0), "got x = {}", pos.x);
    assert!(approx_eq(pos.y, 100.0));
}

#[test]
fn opposite_directions_cancel_but_fixed_order_picks_facing() {
    let mut world = open_world();
    let player = spawn_player_at(&mut world, 100.0, 100.0);
    {
        let mut input = world.resource_mut::<InputState>();
        input.direction_left.active = true;
        input.direction_right.active = true;
    }

    tick_controller(&mut world);

    // Left and right displacements cancel; right is processed last.
    let pos = position_of(&mut world, player);
    assert!(approx_eq(pos.x, 100.0));
    assert_eq!(world.get::<Player>(player).unwrap().facing, Facing::Right);
}

#[test]
fn up_then_down_returns_to_start() {
    let mut world = open_world();
    let player = spawn_player_at(&mut world, 100.0, 100.0);

    world.resource_mut::<InputState>().direction_up.active = true;
    for _ in 0..5 {
        tick_controller(&mut world);
    }
    {
        let mut input = world.resource_mut::<InputState>();
        input.direction_up.active = false;
        input.direction_down.active = true;
    }
    for _ in 0..5 {
        tick_controller(&mut world);
    }

    let pos = position_of(&mut world, player);
    assert!(approx_eq(pos.x, 100.0));
    assert!(approx_eq(pos.y, 100.0));
}

#[test]
fn moving_flag_tracks_input() {
    let mut world = open_world();
    let player = spawn_player_at(&mut world, 100.0, 100.0);

    tick_controller(&mut world);
    assert!(!world.get::<Player>(player).unwrap().moving);

    world.resource_mut::<InputState>().direction_down.active = true;
    tick_controller(&mut world);
    assert!(world.get::<Player>(player).unwrap().moving);
}

// ---------------------------------------------------------------------------
// Animation
// ---------------------------------------------------------------------------

#[test]
fn walk_animation_advances_on_cadence_and_wraps() {
    let mut world = open_world();
    let player = spawn_player_at(&mut world, 100.0, 100.0);
    world.resource_mut::<InputState>().direction_right.active = true;

    let mut seen = vec![];
    for _ in 0..64 {
        tick_controller(&mut world);
        seen.push(world.get::<Player>(player).unwrap().frame);
    }
    // Every walk frame is visited and none leaves the cycle.
    for frame in 0..WALK_FRAMES {
        assert!(seen.contains(&frame), "frame {} never shown", frame);
    }
    assert!(seen.iter().all(|f| *f < WALK_FRAMES));
}

#[test]
fn sprite_offset_follows_facing_row() {
    let mut world = open_world();
    let player = spawn_player_at(&mut world, 100.0, 100.0);
    world.resource_mut::<InputState>().direction_up.active = true;

    tick_controller(&mut world);

    // Row 1 of the sheet faces up.
    let sprite = world.get::<Sprite>(player).unwrap();
    assert!(approx_eq(sprite.offset.y, 48.0));
}

#[test]
fn idle_animation_stays_in_first_two_frames() {
    let mut world = open_world();
    let player = spawn_player_at(&mut world, 100.0, 100.0);

    for _ in 0..300 {
        tick_controller(&mut world);
        assert!(world.get::<Player>(player).unwrap().frame < 2);
    }
}

// ---------------------------------------------------------------------------
// Collision
// ---------------------------------------------------------------------------

#[test]
fn blocked_move_is_rejected_and_recorded() {
    let mut world = walled_world();
    // Flush against the wall at x=192: the 48px collider ends exactly there.
    let player = spawn_player_at(&mut world, 144.0, 100.0);
    world.resource_mut::<InputState>().direction_right.active = true;

    for _ in 0..4 {
        tick_controller(&mut world);
    }

    let pos = position_of(&mut world, player);
    assert!(approx_eq(pos.x, 144.0), "got x = {}", pos.x);
    assert!(!world.resource::<DebugOverlay>().is_empty());
}

#[test]
fn edge_touching_wall_does_not_block() {
    let mut world = walled_world();
    // One step short of the wall: 141 + 3 = 144, exactly edge-touching.
    let player = spawn_player_at(&mut world, 141.0, 100.0);
    world.resource_mut::<InputState>().direction_right.active = true;

    tick_controller(&mut world);

    let pos = position_of(&mut world, player);
    assert!(approx_eq(pos.x, 144.0));
    assert!(world.resource::<DebugOverlay>().is_empty());
}

#[test]
fn diagonal_into_wall_slides_along_free_axis() {
    let mut world = walled_world();
    let player = spawn_player_at(&mut world, 144.0, 100.0);
    {
        let mut input = world.resource_mut::<InputState>();
        input.direction_right.active = true;
        input.direction_down.active = true;
    }

    for _ in 0..5 {
        tick_controller(&mut world);
    }

    // The x axis is blocked by the wall but y keeps advancing.
    let pos = position_of(&mut world, player);
    assert!(approx_eq(pos.x, 144.0));
    assert!(approx_eq(pos.y, 115.0));
}

#[test]
fn overlay_clears_via_event() {
    let mut world = walled_world();
    spawn_player_at(&mut world, 144.0, 100.0);
    world.resource_mut::<InputState>().direction_right.active = true;
    tick_controller(&mut world);
    assert!(!world.resource::<DebugOverlay>().is_empty());

    world.add_observer(clear_overlay_observer);
    world.trigger(ClearOverlayEvent {});
    assert!(world.resource::<DebugOverlay>().is_empty());
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

#[test]
fn camera_centers_on_player_sprite_box() {
    let mut world = open_world();
    spawn_player_at(&mut world, 100.0, 200.0);

    tick_camera(&mut world);

    let cam = world.resource::<CameraView>();
    assert!(approx_eq(cam.target.x, 124.0));
    assert!(approx_eq(cam.target.y, 224.0));
}

#[test]
fn zoom_input_is_debounced_to_one_step_per_tick() {
    let mut world = open_world();
    spawn_player_at(&mut world, 100.0, 100.0);
    {
        let mut input = world.resource_mut::<InputState>();
        input.zoom_in.active = true;
        input.wheel_move = 3.0; // fast scroll still counts as one step
    }

    tick_camera(&mut world);

    let cam = world.resource::<CameraView>();
    assert!(approx_eq(cam.zoom, 1.5 + ZOOM_STEP));
}

#[test]
fn zoom_saturates_at_bounds_over_many_ticks() {
    let mut world = open_world();
    spawn_player_at(&mut world, 100.0, 100.0);

    world.resource_mut::<InputState>().zoom_in.active = true;
    for _ in 0..100 {
        tick_camera(&mut world);
    }
    assert!(approx_eq(world.resource::<CameraView>().zoom, ZOOM_MAX));

    {
        let mut input = world.resource_mut::<InputState>();
        input.zoom_in.active = false;
        input.zoom_out.active = true;
    }
    for _ in 0..100 {
        tick_camera(&mut world);
    }
    assert!(approx_eq(world.resource::<CameraView>().zoom, ZOOM_MIN));
}

// ---------------------------------------------------------------------------
// Music toggle and debug mode
// ---------------------------------------------------------------------------

fn drain_audio_cmds(world: &mut World) -> Vec<AudioCmd> {
    world
        .resource_mut::<Messages<AudioCmd>>()
        .drain()
        .collect()
}

#[test]
fn music_key_pauses_when_playing() {
    let mut world = open_world();
    {
        let mut state = world.resource_mut::<MusicState>();
        state.loaded = true;
        state.playing = true;
    }
    world.resource_mut::<InputState>().toggle_music.just_pressed = true;

    tick_music_toggle(&mut world);

    let cmds = drain_audio_cmds(&mut world);
    assert!(matches!(cmds.as_slice(), [AudioCmd::PauseMusic { .. }]));
}

#[test]
fn music_key_resumes_when_paused() {
    let mut world = open_world();
    {
        let mut state = world.resource_mut::<MusicState>();
        state.loaded = true;
        state.playing = false;
    }
    world.resource_mut::<InputState>().toggle_music.just_pressed = true;

    tick_music_toggle(&mut world);

    let cmds = drain_audio_cmds(&mut world);
    assert!(matches!(cmds.as_slice(), [AudioCmd::ResumeMusic { .. }]));
}

#[test]
fn music_key_ignored_until_track_loaded() {
    let mut world = open_world();
    world.resource_mut::<InputState>().toggle_music.just_pressed = true;

    tick_music_toggle(&mut world);

    assert!(drain_audio_cmds(&mut world).is_empty());
}

// ---------------------------------------------------------------------------
// Music startup
// ---------------------------------------------------------------------------

/// Bridge backed by a stub audio thread that answers the first load command
/// with the given reply. Returns the command receiver so tests can inspect
/// what was sent after the handshake.
fn stub_audio_bridge(
    reply: AudioMessage,
) -> (AudioBridge, crossbeam_channel::Receiver<AudioCmd>) {
    let (tx_cmd, rx_cmd) = crossbeam_channel::unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = crossbeam_channel::unbounded::<AudioMessage>();
    let thread_rx = rx_cmd.clone();
    let handle = std::thread::spawn(move || {
        if let Ok(AudioCmd::LoadMusic { .. }) = thread_rx.recv() {
            let _ = tx_msg.send(reply);
        }
    });
    (
        AudioBridge {
            tx_cmd,
            rx_msg,
            handle,
        },
        rx_cmd,
    )
}

fn world_with_bridge(bridge: AudioBridge) -> World {
    let mut world = World::new();
    world.insert_resource(bridge);
    world.insert_resource(MusicState::default());
    world
}

#[test]
fn startup_aborts_when_music_fails_to_load() {
    let (bridge, _rx_cmd) = stub_audio_bridge(AudioMessage::MusicLoadFailed {
        id: "farm_theme".into(),
        error: "could not decode".into(),
    });
    let mut world = world_with_bridge(bridge);
    let config = GameConfig::new();

    let err = start_music(&mut world, &config).unwrap_err();
    assert!(matches!(err, GameError::AssetLoad { .. }));
    assert!(!world.resource::<MusicState>().loaded);
}

#[test]
fn startup_plays_music_once_loaded() {
    let (bridge, rx_cmd) = stub_audio_bridge(AudioMessage::MusicLoaded {
        id: "farm_theme".into(),
    });
    let mut world = world_with_bridge(bridge);
    let config = GameConfig::new();

    start_music(&mut world, &config).unwrap();

    let state = world.resource::<MusicState>();
    assert!(state.loaded);
    assert!(state.playing);
    // The stub consumed the load command; the play command is still queued.
    assert!(matches!(
        rx_cmd.try_recv(),
        Ok(AudioCmd::PlayMusic { looped: true, .. })
    ));
}

#[test]
fn startup_mute_loads_without_playing() {
    let (bridge, rx_cmd) = stub_audio_bridge(AudioMessage::MusicLoaded {
        id: "farm_theme".into(),
    });
    let mut world = world_with_bridge(bridge);
    let mut config = GameConfig::new();
    config.mute = true;

    start_music(&mut world, &config).unwrap();

    let state = world.resource::<MusicState>();
    assert!(state.loaded);
    assert!(!state.playing);
    assert!(rx_cmd.try_recv().is_err());
}

#[test]
fn debug_mode_toggles_via_event() {
    let mut world = open_world();
    world.add_observer(switch_debug_observer);

    assert!(world.get_resource::<DebugMode>().is_none());
    world.trigger(SwitchDebugEvent {});
    world.flush();
    assert!(world.get_resource::<DebugMode>().is_some());
    world.trigger(SwitchDebugEvent {});
    world.flush();
    assert!(world.get_resource::<DebugMode>().is_none());
}
