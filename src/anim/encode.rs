//! Frame snapshots → loopable keyframe timelines
//!
//! Nothing is re-simulated here. Positions are emitted one value per frame;
//! bricks and particle bursts collapse to a handful of keyframes around the
//! frame where each brick broke.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::timeline::{Timeline, time_fraction};
use crate::config::Config;
use crate::palette::{Color, Colors, Palette};
use crate::sim::{Brick, BrickStatus, FrameSnapshot};

/// A brick as drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickTrack {
    /// Index into the brick list
    pub index: usize,
    pub x: f32,
    pub y: f32,
    /// Fill while the brick stands
    pub fill: Color,
    /// Passed-through brick, drawn faded
    pub ghost: bool,
    /// Loop fraction at which the brick disappears
    pub destroyed_at: Option<f32>,
    /// `None` for bricks that are never destroyed
    pub fill_timeline: Option<Timeline<Color>>,
}

/// One fragment of a brick's burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleTrack {
    pub brick: usize,
    /// Brick center
    pub origin: Vec2,
    /// Final displacement from the origin
    pub offset: Vec2,
    pub fill: Color,
    /// Burst window, as loop fractions
    pub start: f32,
    pub end: f32,
    pub opacity: Timeline<f32>,
    pub translate: Timeline<Vec2>,
}

/// Everything needed to play the run back on a loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub frame_count: usize,
    /// Loop length in seconds
    pub duration: f32,
    pub ball_x: Timeline<f32>,
    pub ball_y: Timeline<f32>,
    pub paddle_x: Timeline<f32>,
    /// Per-frame ball color, flashing on frames where a brick broke
    pub ball_fill: Timeline<Color>,
    pub bricks: Vec<BrickTrack>,
    pub particles: Vec<ParticleTrack>,
}

/// Frame at which a brick goes from visible to hidden, if it ever does
fn destruction_frame(index: usize, initial: BrickStatus, frames: &[FrameSnapshot]) -> Option<usize> {
    let mut before = initial;
    for (i, frame) in frames.iter().enumerate() {
        let now = frame.brick_statuses[index];
        if before == BrickStatus::Visible && now == BrickStatus::Hidden {
            return Some(i);
        }
        debug_assert!(
            !(before == BrickStatus::Hidden && now == BrickStatus::Visible),
            "brick {} reappeared at frame {}",
            index,
            i
        );
        before = now;
    }
    None
}

/// Build every timeline for a finished run
pub fn encode(
    frames: &[FrameSnapshot],
    bricks: &[Brick],
    palette: &Palette,
    colors: &Colors,
    ghost_mode: bool,
    config: &Config,
) -> Animation {
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(
            frame.brick_statuses.len(),
            bricks.len(),
            "frame {} has {} statuses for {} bricks",
            i,
            frame.brick_statuses.len(),
            bricks.len()
        );
    }

    let frame_count = frames.len();
    let duration = frame_count as f32 * config.seconds_per_frame;

    let ball_x = Timeline::uniform(frames.iter().map(|f| f.ball_x).collect());
    let ball_y = Timeline::uniform(frames.iter().map(|f| f.ball_y).collect());
    let paddle_x = Timeline::uniform(frames.iter().map(|f| f.paddle_x).collect());
    let ball_fill = Timeline::uniform(
        frames
            .iter()
            .map(|f| match f.hit {
                Some(_) => colors.ball_hit.clone(),
                None => colors.ball.clone(),
            })
            .collect(),
    );

    let mut tracks = Vec::with_capacity(bricks.len());
    let mut particles = Vec::new();
    for (index, brick) in bricks.iter().enumerate() {
        let fill = palette.level(brick.color_bucket).clone();
        let destroyed_at = destruction_frame(index, brick.status, frames)
            .map(|frame| time_fraction(frame, frame_count));

        let fill_timeline = destroyed_at.map(|t| {
            Timeline::keyed([
                (0.0, fill.clone()),
                (t, fill.clone()),
                (t, colors.background.clone()),
                (1.0, colors.background.clone()),
            ])
        });

        if let Some(t) = destroyed_at {
            particles.extend(burst(index, brick, &fill, t, duration, config));
        }

        tracks.push(BrickTrack {
            index,
            x: brick.x,
            y: brick.y,
            fill,
            ghost: ghost_mode && !brick.active,
            destroyed_at,
            fill_timeline,
        });
    }

    log::debug!(
        "encoded {} frames ({:.2}s), {} destroyed bricks, {} particles",
        frame_count,
        duration,
        tracks.iter().filter(|t| t.destroyed_at.is_some()).count(),
        particles.len()
    );

    Animation {
        frame_count,
        duration,
        ball_x,
        ball_y,
        paddle_x,
        ball_fill,
        bricks: tracks,
        particles,
    }
}

/// Burst window for a brick destroyed at `start`. Never runs past the end of
/// the loop; a late burst is squeezed into the time that's left.
pub fn burst_window(start: f32, duration: f32, burst_seconds: f32) -> (f32, f32) {
    let end = if duration > 0.0 {
        (start + burst_seconds / duration).min(1.0)
    } else {
        1.0
    };
    (start, end.max(start))
}

/// Fragments fanned out evenly around the brick center
fn burst(
    index: usize,
    brick: &Brick,
    fill: &Color,
    t: f32,
    duration: f32,
    config: &Config,
) -> Vec<ParticleTrack> {
    let (start, end) = burst_window(t, duration, config.burst_seconds);
    let origin = brick.center(config.cell_size);
    let count = config.particle_count;

    (0..count)
        .map(|k| {
            let angle = TAU * k as f32 / count as f32;
            let offset = Vec2::new(angle.cos(), angle.sin()) * config.particle_distance;
            ParticleTrack {
                brick: index,
                origin,
                offset,
                fill: fill.clone(),
                start,
                end,
                opacity: Timeline::keyed([
                    (0.0, 0.0),
                    (start, 0.0),
                    (start, 1.0),
                    (end, 0.0),
                    (1.0, 0.0),
                ]),
                translate: Timeline::keyed([
                    (0.0, Vec2::ZERO),
                    (start, Vec2::ZERO),
                    (end, offset),
                    (1.0, offset),
                ]),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PalettePreset;

    fn frame(x: f32, statuses: &[BrickStatus], hit: Option<usize>) -> FrameSnapshot {
        FrameSnapshot {
            ball_x: x,
            ball_y: 100.0 - x,
            paddle_x: x - 10.0,
            brick_statuses: statuses.to_vec(),
            hit,
        }
    }

    fn encode_default(frames: &[FrameSnapshot], bricks: &[Brick]) -> Animation {
        encode(
            frames,
            bricks,
            &Palette::preset(PalettePreset::Light),
            &Colors::for_preset(PalettePreset::Light),
            false,
            &Config::default(),
        )
    }

    use BrickStatus::{Hidden, Visible};

    #[test]
    fn test_empty_frames() {
        let bricks = vec![Brick::new(20.0, 20.0, 2, true)];
        let anim = encode_default(&[], &bricks);
        assert_eq!(anim.duration, 0.0);
        assert_eq!(anim.frame_count, 0);
        assert!(anim.ball_x.is_empty());
        assert!(anim.particles.is_empty());
        assert_eq!(anim.bricks.len(), 1);
        assert!(anim.bricks[0].fill_timeline.is_none());
    }

    #[test]
    fn test_single_frame_hit_at_zero() {
        let bricks = vec![Brick::new(20.0, 20.0, 1, true)];
        let frames = vec![frame(50.0, &[Hidden], Some(0))];
        let anim = encode_default(&frames, &bricks);

        let config = Config::default();
        assert_eq!(anim.duration, config.seconds_per_frame);
        assert_eq!(anim.bricks[0].destroyed_at, Some(0.0));
        // Burst is longer than the loop, so it takes the whole loop
        assert!(anim.particles.iter().all(|p| p.start == 0.0 && p.end == 1.0));
    }

    #[test]
    fn test_position_timelines_follow_frames() {
        let bricks = vec![Brick::new(20.0, 20.0, 1, true)];
        let frames: Vec<_> = (0..5)
            .map(|i| frame(30.0 + i as f32, &[Visible], None))
            .collect();
        let anim = encode_default(&frames, &bricks);

        assert_eq!(anim.ball_x.len(), 5);
        assert!(anim.ball_x.is_uniform());
        assert_eq!(
            anim.ball_x.values().copied().collect::<Vec<_>>(),
            vec![30.0, 31.0, 32.0, 33.0, 34.0]
        );
        assert_eq!(anim.paddle_x.values().next(), Some(&20.0));
        assert_eq!(anim.ball_y.times().last(), Some(1.0));
    }

    #[test]
    fn test_brick_step_timeline() {
        let bricks = vec![
            Brick::new(20.0, 20.0, 3, true),
            Brick::new(35.0, 20.0, 1, true),
        ];
        let frames = vec![
            frame(0.0, &[Visible, Visible], None),
            frame(1.0, &[Visible, Visible], None),
            frame(2.0, &[Hidden, Visible], Some(0)),
            frame(3.0, &[Hidden, Visible], None),
            frame(4.0, &[Hidden, Visible], None),
        ];
        let anim = encode_default(&frames, &bricks);
        let colors = Colors::for_preset(PalettePreset::Light);
        let palette = Palette::preset(PalettePreset::Light);

        let track = &anim.bricks[0];
        assert_eq!(track.destroyed_at, Some(0.5));
        let timeline = track.fill_timeline.as_ref().unwrap();
        assert_eq!(timeline.times().collect::<Vec<_>>(), vec![0.0, 0.5, 0.5, 1.0]);
        let values: Vec<_> = timeline.values().cloned().collect();
        assert_eq!(
            values,
            vec![
                palette.level(3).clone(),
                palette.level(3).clone(),
                colors.background.clone(),
                colors.background.clone()
            ]
        );

        assert!(anim.bricks[1].fill_timeline.is_none());
        assert_eq!(
            anim.particles.len(),
            Config::default().particle_count as usize
        );
        assert!(anim.particles.iter().all(|p| p.brick == 0));
    }

    #[test]
    fn test_ball_flash_on_hit_frames() {
        let bricks = vec![Brick::new(20.0, 20.0, 3, true)];
        let frames = vec![
            frame(0.0, &[Visible], None),
            frame(1.0, &[Hidden], Some(0)),
            frame(2.0, &[Hidden], None),
        ];
        let anim = encode_default(&frames, &bricks);
        let colors = Colors::for_preset(PalettePreset::Light);
        let fills: Vec<_> = anim.ball_fill.values().cloned().collect();
        assert_eq!(fills, vec![colors.ball.clone(), colors.ball_hit, colors.ball]);
    }

    #[test]
    fn test_last_frame_burst_clamped_to_one() {
        let bricks = vec![Brick::new(20.0, 20.0, 2, true)];
        let mut frames: Vec<_> = (0..99).map(|i| frame(i as f32, &[Visible], None)).collect();
        frames.push(frame(99.0, &[Hidden], Some(0)));
        let anim = encode_default(&frames, &bricks);

        assert_eq!(anim.bricks[0].destroyed_at, Some(1.0));
        for particle in &anim.particles {
            assert_eq!(particle.start, 1.0);
            assert_eq!(particle.end, 1.0);
            assert!(particle.opacity.times().all(|t| t <= 1.0));
            assert!(particle.translate.times().all(|t| t <= 1.0));
        }
    }

    #[test]
    fn test_late_burst_truncated() {
        let config = Config::default();
        // 100 frames; burst would need burst_seconds / duration of the loop
        let duration = 100.0 * config.seconds_per_frame;
        let start = 0.95;
        let (s, e) = burst_window(start, duration, config.burst_seconds);
        assert_eq!(s, start);
        assert_eq!(e, (start + config.burst_seconds / duration).min(1.0));
        assert!(e <= 1.0);

        let (_, early_end) = burst_window(0.1, duration, config.burst_seconds);
        assert!((early_end - (0.1 + config.burst_seconds / duration)).abs() < 1e-6);
    }

    #[test]
    fn test_particles_evenly_spread() {
        let config = Config::default();
        let brick = Brick::new(20.0, 20.0, 1, true);
        let fill = Palette::preset(PalettePreset::Light).level(1).clone();
        let particles = burst(0, &brick, &fill, 0.2, 10.0, &config);
        assert_eq!(particles.len(), config.particle_count as usize);

        let origin = brick.center(config.cell_size);
        let sum = particles.iter().fold(Vec2::ZERO, |acc, p| acc + p.offset);
        assert!(sum.length() < 1e-3);
        for p in &particles {
            assert_eq!(p.origin, origin);
            assert!((p.offset.length() - config.particle_distance).abs() < 1e-3);
        }
    }

    #[test]
    fn test_ghost_flag_only_in_ghost_mode() {
        let bricks = vec![Brick::new(20.0, 20.0, 0, false), Brick::new(35.0, 20.0, 1, true)];
        let frames = vec![frame(0.0, &[Visible, Visible], None)];
        let anim = encode(
            &frames,
            &bricks,
            &Palette::preset(PalettePreset::Dark),
            &Colors::for_preset(PalettePreset::Dark),
            true,
            &Config::default(),
        );
        assert!(anim.bricks[0].ghost);
        assert!(!anim.bricks[1].ghost);
    }

    #[test]
    #[should_panic(expected = "statuses for")]
    fn test_mismatched_statuses_panic() {
        let bricks = vec![Brick::new(20.0, 20.0, 0, true)];
        let frames = vec![frame(0.0, &[Visible, Visible], None)];
        encode_default(&frames, &bricks);
    }
}
