//! Dodge frame logic: input mapping, car movement, obstacles, collisions and score.

use super::io::InputSnapshot;
use super::types::*;
use crate::config::GameConfig;
use rand::Rng;

/// Result of a single playing frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Survived,
    Collided,
}

/// Map the frame's input to a horizontal car velocity.
///
/// Keys are read first, then a pressed pointer overwrites them: pointer
/// steering wins when both are active.
pub fn sample_velocity(input: &InputSnapshot, config: &GameConfig) -> i32 {
    let mut velocity = if input.left {
        -config.speed
    } else if input.right {
        config.speed
    } else {
        0
    };

    if input.pointer.pressed {
        // x < width / 2 without truncating odd widths
        velocity = if input.pointer.x * 2 < config.screen_width {
            -config.speed
        } else {
            config.speed
        };
    }

    velocity
}

/// New car x after applying `velocity`, clamped to the screen.
pub fn move_car(x: i32, velocity: i32, config: &GameConfig) -> i32 {
    (x + velocity).clamp(0, config.max_car_x())
}

/// Scroll every obstacle down by the obstacle speed.
pub fn advance_obstacles(obstacles: &mut [Obstacle], config: &GameConfig) {
    for obstacle in obstacles.iter_mut() {
        obstacle.y += config.obstacle_speed;
    }
}

/// Index of the first obstacle overlapping the car, if any.
pub fn find_collision(car: &Car, obstacles: &[Obstacle]) -> Option<usize> {
    let car_bounds = car.bounds();
    obstacles
        .iter()
        .position(|obstacle| car_bounds.intersects(&obstacle.bounds()))
}

/// Drop obstacles that have scrolled past the bottom edge.
pub fn prune_obstacles(obstacles: &mut Vec<Obstacle>, config: &GameConfig) {
    obstacles.retain(|o| o.y < config.screen_height);
}

/// One Bernoulli trial at the configured spawn chance.
pub fn roll_spawn<R: Rng>(config: &GameConfig, rng: &mut R) -> bool {
    rng.gen::<f64>() < config.spawn_chance
}

/// Run one playing frame against the session.
///
/// On collision the session is flagged game-over and left untouched
/// otherwise: no prune, no spawn, and the score keeps its previous value.
pub fn step_frame<R: Rng>(
    session: &mut GameSession,
    input: &InputSnapshot,
    config: &GameConfig,
    rng: &mut R,
) -> FrameOutcome {
    if session.game_over {
        return FrameOutcome::Collided;
    }

    // 1. Steer
    let velocity = sample_velocity(input, config);
    session.car.velocity = velocity;
    session.car.x = move_car(session.car.x, velocity, config);

    // 2. Scroll obstacles
    advance_obstacles(&mut session.obstacles, config);

    // 3. Collisions are checked before pruning
    if find_collision(&session.car, &session.obstacles).is_some() {
        session.game_over = true;
        return FrameOutcome::Collided;
    }

    // 4. Prune
    prune_obstacles(&mut session.obstacles, config);

    // 5. Spawn
    if roll_spawn(config, rng) {
        session.spawn_obstacle(config, rng);
    }

    // 6. Score
    session.score += 1;

    FrameOutcome::Survived
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::io::PointerState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn quiet_config() -> GameConfig {
        GameConfig {
            spawn_chance: 0.0,
            ..GameConfig::default()
        }
    }

    fn pointer_at(x: i32) -> PointerState {
        PointerState { pressed: true, x }
    }

    // ── Input mapping ──

    #[test]
    fn test_no_input_is_zero_velocity() {
        let config = GameConfig::default();
        assert_eq!(sample_velocity(&InputSnapshot::default(), &config), 0);
    }

    #[test]
    fn test_keys_map_to_speed() {
        let config = GameConfig::default();
        let left = InputSnapshot {
            left: true,
            ..Default::default()
        };
        let right = InputSnapshot {
            right: true,
            ..Default::default()
        };
        assert_eq!(sample_velocity(&left, &config), -20);
        assert_eq!(sample_velocity(&right, &config), 20);
    }

    #[test]
    fn test_left_key_wins_over_right_key() {
        let config = GameConfig::default();
        let both = InputSnapshot {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(sample_velocity(&both, &config), -20);
    }

    #[test]
    fn test_pointer_halves() {
        let config = GameConfig::default();
        let left_half = InputSnapshot {
            pointer: pointer_at(0),
            ..Default::default()
        };
        let just_left = InputSnapshot {
            pointer: pointer_at(399),
            ..Default::default()
        };
        let middle = InputSnapshot {
            pointer: pointer_at(400),
            ..Default::default()
        };
        assert_eq!(sample_velocity(&left_half, &config), -20);
        assert_eq!(sample_velocity(&just_left, &config), -20);
        assert_eq!(sample_velocity(&middle, &config), 20);
    }

    #[test]
    fn test_pointer_overrides_keys() {
        let config = GameConfig::default();
        let input = InputSnapshot {
            left: true,
            pointer: pointer_at(700),
            ..Default::default()
        };
        assert_eq!(sample_velocity(&input, &config), 20);
    }

    #[test]
    fn test_released_pointer_is_ignored() {
        let config = GameConfig::default();
        let input = InputSnapshot {
            right: true,
            pointer: PointerState {
                pressed: false,
                x: 0,
            },
            ..Default::default()
        };
        assert_eq!(sample_velocity(&input, &config), 20);
    }

    // ── Car movement ──

    #[test]
    fn test_move_car_clamps_left_edge() {
        let config = GameConfig::default();
        assert_eq!(move_car(0, -config.speed, &config), 0);
        assert_eq!(move_car(5, -config.speed, &config), 0);
    }

    #[test]
    fn test_move_car_clamps_right_edge() {
        let config = GameConfig::default();
        let max = config.max_car_x();
        assert_eq!(move_car(max, config.speed, &config), max);
        assert_eq!(move_car(max - 5, config.speed, &config), max);
    }

    #[test]
    fn test_move_car_stays_in_bounds() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let x = rng.gen_range(0..=config.max_car_x());
            let v = rng.gen_range(-100..=100);
            let moved = move_car(x, v, &config);
            assert!((0..=config.max_car_x()).contains(&moved));
        }
    }

    #[test]
    fn test_largest_accepted_config_steers_without_overflow() {
        let max = crate::constants::MAX_SCREEN_DIMENSION;
        let config = GameConfig::from_json(&format!(
            r#"{{ "screen_width": {max}, "screen_height": {max}, "speed": {max}, "spawn_chance": 0.0 }}"#
        ))
        .unwrap();
        let mut session = GameSession::new(&config);
        let input = InputSnapshot {
            right: true,
            pointer: pointer_at(max),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(step_frame(&mut session, &input, &config, &mut rng), FrameOutcome::Survived);
        assert_eq!(session.car.x, config.max_car_x());
    }

    // ── Obstacles ──

    #[test]
    fn test_advance_obstacles() {
        let config = GameConfig::default();
        let mut obstacles = vec![
            Obstacle::new(0, -100, &config),
            Obstacle::new(50, 300, &config),
        ];
        advance_obstacles(&mut obstacles, &config);
        assert_eq!(obstacles[0].y, -80);
        assert_eq!(obstacles[1].y, 320);
    }

    #[test]
    fn test_prune_boundary() {
        let config = GameConfig::default();
        let mut obstacles = vec![
            Obstacle::new(0, config.screen_height - 1, &config),
            Obstacle::new(0, config.screen_height, &config),
            Obstacle::new(0, config.screen_height + 40, &config),
        ];
        prune_obstacles(&mut obstacles, &config);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].y, config.screen_height - 1);
    }

    #[test]
    fn test_spawn_rate_matches_probability() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let trials = 100_000u32;

        let spawns = (0..trials).filter(|_| roll_spawn(&config, &mut rng)).count() as f64;

        let mean = trials as f64 * config.spawn_chance;
        let std_dev = (mean * (1.0 - config.spawn_chance)).sqrt();
        assert!(
            (spawns - mean).abs() < 5.0 * std_dev,
            "{} spawns, expected about {}",
            spawns,
            mean
        );
    }

    #[test]
    fn test_spawn_chance_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let never = quiet_config();
        let always = GameConfig {
            spawn_chance: 1.0,
            ..GameConfig::default()
        };
        assert!((0..1000).all(|_| !roll_spawn(&never, &mut rng)));
        assert!((0..1000).all(|_| roll_spawn(&always, &mut rng)));
    }

    // ── Collisions ──

    #[test]
    fn test_collision_identical_bounds() {
        let config = GameConfig::default();
        let car = Car::new(&config);
        let obstacles = vec![Obstacle::new(car.x, car.y, &config)];
        assert_eq!(find_collision(&car, &obstacles), Some(0));
    }

    #[test]
    fn test_collision_far_apart() {
        let config = GameConfig::default();
        let car = Car::new(&config);
        let obstacles = vec![
            Obstacle::new(0, 0, &config),
            Obstacle::new(car.x + 3 * car.width, car.y, &config),
        ];
        assert_eq!(find_collision(&car, &obstacles), None);
    }

    #[test]
    fn test_collision_touching_edges() {
        let config = GameConfig::default();
        let car = Car::new(&config);
        let obstacles = vec![
            Obstacle::new(car.x - config.obstacle_width(), car.y, &config),
            Obstacle::new(car.x + car.width, car.y, &config),
            Obstacle::new(car.x, car.y - config.obstacle_height(), &config),
        ];
        assert_eq!(find_collision(&car, &obstacles), None);
    }

    #[test]
    fn test_collision_reports_first_hit() {
        let config = GameConfig::default();
        let car = Car::new(&config);
        let obstacles = vec![
            Obstacle::new(0, 0, &config),
            Obstacle::new(car.x + 1, car.y, &config),
            Obstacle::new(car.x, car.y, &config),
        ];
        assert_eq!(find_collision(&car, &obstacles), Some(1));
    }

    // ── Frame step ──

    #[test]
    fn test_step_frame_idle() {
        let config = quiet_config();
        let mut session = GameSession::new(&config);
        let mut rng = StdRng::seed_from_u64(0);
        let car_before = session.car.clone();

        let outcome = step_frame(&mut session, &InputSnapshot::default(), &config, &mut rng);

        assert_eq!(outcome, FrameOutcome::Survived);
        assert_eq!(session.car, car_before);
        assert_eq!(session.score, 1);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_step_frame_scores_every_frame() {
        let config = quiet_config();
        let mut session = GameSession::new(&config);
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..250 {
            step_frame(&mut session, &InputSnapshot::default(), &config, &mut rng);
        }
        assert_eq!(session.score, 250);
    }

    #[test]
    fn test_step_frame_collision_freezes_score() {
        let config = quiet_config();
        let mut session = GameSession::new(&config);
        let mut rng = StdRng::seed_from_u64(0);
        session.score = 42;
        // Lands exactly on the car after one advance
        let (x, y) = (session.car.x, session.car.y - config.obstacle_speed);
        session.obstacles.push(Obstacle::new(x, y, &config));

        let outcome = step_frame(&mut session, &InputSnapshot::default(), &config, &mut rng);

        assert_eq!(outcome, FrameOutcome::Collided);
        assert!(session.game_over);
        assert_eq!(session.score, 42);
        assert_eq!(session.obstacles.len(), 1);
    }

    #[test]
    fn test_step_frame_after_game_over_is_inert() {
        let config = quiet_config();
        let mut session = GameSession::new(&config);
        let mut rng = StdRng::seed_from_u64(0);
        session.game_over = true;
        session.score = 9;

        let input = InputSnapshot {
            right: true,
            ..Default::default()
        };
        let outcome = step_frame(&mut session, &input, &config, &mut rng);

        assert_eq!(outcome, FrameOutcome::Collided);
        assert_eq!(session.score, 9);
        assert_eq!(session.car.x, config.car_start_x());
    }

    #[test]
    fn test_step_frame_prunes_after_collision_check() {
        let config = quiet_config();
        let mut session = GameSession::new(&config);
        let mut rng = StdRng::seed_from_u64(0);
        // Moves to screen_height this frame and is dropped
        session
            .obstacles
            .push(Obstacle::new(0, config.screen_height - config.obstacle_speed, &config));
        // Moves to screen_height - 1 and stays
        session.obstacles.push(Obstacle::new(
            0,
            config.screen_height - 1 - config.obstacle_speed,
            &config,
        ));

        step_frame(&mut session, &InputSnapshot::default(), &config, &mut rng);

        assert_eq!(session.obstacles.len(), 1);
        assert_eq!(session.obstacles[0].y, config.screen_height - 1);
    }

    #[test]
    fn test_step_frame_spawns_at_top() {
        let config = GameConfig {
            spawn_chance: 1.0,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(&config);
        let mut rng = StdRng::seed_from_u64(0);

        step_frame(&mut session, &InputSnapshot::default(), &config, &mut rng);

        assert_eq!(session.obstacles.len(), 1);
        assert_eq!(session.obstacles[0].y, -config.obstacle_height());
    }

    #[test]
    fn test_step_frame_steers_car() {
        let config = quiet_config();
        let mut session = GameSession::new(&config);
        let mut rng = StdRng::seed_from_u64(0);
        let input = InputSnapshot {
            left: true,
            ..Default::default()
        };

        step_frame(&mut session, &input, &config, &mut rng);

        assert_eq!(session.car.x, config.car_start_x() - config.speed);
        assert_eq!(session.car.velocity, -config.speed);
    }
}
