//! Level simulation
//!
//! Everything that advances during a tick lives here. Randomness comes only
//! from seeded `Pcg32` streams, and every collection is iterated in
//! insertion order, so a level replays identically from the same seed and
//! inputs.

pub mod actor;
pub mod black_hole;
pub mod camera;
pub mod collision;
pub mod food_cart;
pub mod gadget;
pub mod geometry;
pub mod input;
pub mod level;
pub mod player;
pub mod tick;
pub mod unicorn;
pub mod wave;
pub mod weapon;

pub use actor::{Collidable, Drawable, LifeState, PhysicalUnit, SpawnGated, Updatable};
pub use black_hole::{BlackHole, BlackHoleData, BlackHoleState, HazardEffects};
pub use camera::Camera2D;
pub use collision::{CollisionResult, circle_collision, separate, unit_collision};
pub use food_cart::{FoodCart, FoodCartData};
pub use gadget::{Gadget, GadgetData};
pub use geometry::Rect;
pub use input::{InputSource, InputState};
pub use level::{Gamestate, Level};
pub use player::Spaceman;
pub use tick::{GameTime, TickStats};
pub use unicorn::{Unicorn, UnicornData};
pub use wave::{Enemy, EnemyData, Wave, WaveData};
pub use weapon::{ProjectileWeapon, Weapon, WeaponData};
