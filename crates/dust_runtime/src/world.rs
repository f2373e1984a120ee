//! Game world and frame scheduler
//!
//! [`GameWorld`] owns every piece of simulation state and advances it once
//! per frame in a fixed order: capture and pause, reset, weapon timers,
//! player movement, firing, projectiles, target decay.

use crate::arena::Arena;
use crate::config::{GameConfig, Result};
use crate::input::InputState;
use crate::viewpoint::Viewpoint;
use dust_combat::{HitEvent, ProjectilePool, SlotId, TargetId, TargetSet, Weapon};
use dust_physics::{
    CapsuleResolver, CharacterController, CollidableCache, GroundPlane, PlayerState, SharedScene,
    StepOutcome,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// What happened during one [`GameWorld::update`]
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Projectiles that reached a target
    pub hits: Vec<HitEvent>,
    /// Targets whose decay finished this frame
    pub removed: Vec<TargetId>,
    /// Slot of the projectile fired this frame
    pub fired: Option<SlotId>,
    /// Whether the player was reset to spawn
    pub reset: bool,
    /// Movement result, when the controller ran
    pub step: Option<StepOutcome>,
    /// Player state at the end of the frame
    pub player: PlayerState,
}

/// The running simulation
pub struct GameWorld {
    config: GameConfig,
    scene: SharedScene,
    ground: GroundPlane,
    resolver: CapsuleResolver,
    controller: CharacterController,
    viewpoint: Viewpoint,
    weapon: Weapon,
    projectiles: ProjectilePool,
    targets: TargetSet,
    rng: ChaCha8Rng,
    /// Pointer is captured
    locked: bool,
    paused: bool,
    frame: u64,
    elapsed: f64,
    destroyed: u32,
}

impl GameWorld {
    /// Create a world for `arena` standing on the configured ground plane
    pub fn new(config: GameConfig, arena: &Arena) -> Result<Self> {
        config.validate()?;

        let scene = arena.build_scene();
        let mut targets = TargetSet::new(config.decay.clone())?;
        arena.spawn_targets(&mut targets);

        let ground = config.ground;
        let world = Self::with_scene(config, scene, ground, targets);
        log::info!(
            "Game world created: arena '{}', {} targets, seed {}",
            arena.name,
            world.targets.len(),
            world.config.seed
        );
        Ok(world)
    }

    /// Create a world over an existing scene and target set
    ///
    /// The config is assumed valid.
    pub fn with_scene(
        config: GameConfig,
        scene: SharedScene,
        ground: GroundPlane,
        targets: TargetSet,
    ) -> Self {
        let resolver = CapsuleResolver::new(config.capsule.clone(), CollidableCache::new(&scene));
        let controller = CharacterController::new(config.movement.clone());
        let viewpoint = Viewpoint::new(controller.position());

        Self {
            resolver,
            controller,
            viewpoint,
            weapon: Weapon::new(config.weapon.clone()),
            projectiles: ProjectilePool::new(config.projectile.clone()),
            targets,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            scene,
            ground,
            locked: false,
            paused: false,
            frame: 0,
            elapsed: 0.0,
            destroyed: 0,
            config,
        }
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32, input: &InputState) -> FrameReport {
        self.frame += 1;
        self.elapsed += f64::from(dt);

        self.apply_capture(input);
        let reset = input.reset && self.reset_player();

        self.weapon.update(dt);

        let active = self.locked && !self.paused;
        self.controller.set_active(active);

        let mut step = None;
        if active {
            self.viewpoint.look(input.look_delta, &self.config.look);
            if input.jump && self.controller.jump() {
                log::trace!("Jump");
            }
            step = Some(self.controller.update(
                dt,
                input.move_intent(),
                self.viewpoint.forward(),
                &mut self.resolver,
                &self.ground,
            ));
        }
        self.viewpoint.position = self.controller.position();

        let fired = if active && input.fire { self.fire() } else { None };

        self.projectiles.advance(dt);
        let hits = self.projectiles.resolve_hits(&mut self.targets, &mut self.rng);
        self.destroyed += hits.len() as u32;

        let removed = self.targets.advance(dt);

        FrameReport {
            frame: self.frame,
            hits,
            removed,
            fired,
            reset,
            step,
            player: *self.controller.state(),
        }
    }

    fn apply_capture(&mut self, input: &InputState) {
        match input.capture {
            Some(true) if !self.paused => self.locked = true,
            Some(false) => self.locked = false,
            _ => {}
        }

        if input.pause {
            if self.locked {
                self.paused = true;
                self.locked = false;
                log::info!("Paused");
            } else if self.paused {
                self.paused = false;
                self.locked = true;
                log::info!("Resumed");
            }
        }
    }

    fn reset_player(&mut self) -> bool {
        self.controller.reset();
        self.viewpoint.position = self.controller.position();
        if self.paused {
            self.paused = false;
            self.locked = true;
            log::info!("Resumed after reset");
        }
        true
    }

    fn fire(&mut self) -> Option<SlotId> {
        let view = &self.viewpoint;
        let shot = self
            .weapon
            .fire(view.position, view.forward(), view.right(), view.up())?;
        let slot = self
            .projectiles
            .fire(shot.origin, shot.direction, self.config.projectile.speed);
        log::trace!("Fired into slot {:?}", slot);
        slot
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shared static scene
    pub fn scene(&self) -> &SharedScene {
        &self.scene
    }

    /// Drop the cached collidables after editing the scene outside the
    /// revision-tracked API
    pub fn invalidate_collision_cache(&mut self) {
        self.resolver.cache_mut().invalidate();
    }

    pub fn viewpoint(&self) -> &Viewpoint {
        &self.viewpoint
    }

    pub fn viewpoint_mut(&mut self) -> &mut Viewpoint {
        &mut self.viewpoint
    }

    pub fn player(&self) -> &PlayerState {
        self.controller.state()
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn projectiles(&self) -> &ProjectilePool {
        &self.projectiles
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    /// Whether the pointer is captured
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Frames simulated so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated seconds so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Targets destroyed so far
    pub fn destroyed_count(&self) -> u32 {
        self.destroyed
    }

    /// One-line state summary
    pub fn debug_info(&self) -> String {
        let p = self.controller.state().position;
        format!(
            "Frame {} | Player ({:.2}, {:.2}, {:.2}) grounded: {} | Projectiles: {}/{} | Targets: {} alive, {} destroyed",
            self.frame,
            p.x,
            p.y,
            p.z,
            self.controller.state().grounded,
            self.projectiles.active_count(),
            self.projectiles.capacity(),
            self.targets.alive_count(),
            self.destroyed
        )
    }
}
