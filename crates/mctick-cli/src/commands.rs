//! The `animate ...` shape command surface: a space-separated,
//! case-insensitive token grammar dispatched against an
//! [`AnimationManager`].
//!
//! Grounded on the `handleCreate`/`handleMove`/`handleSpin`/`handleOrbit`
//! family in `original_source/mcticks/go/animate/shapes.go`: per-arity
//! usage errors before any field parsing, field-by-field parsing with a
//! named error per bad token, no partial mutation on failure.

use std::fmt;

use mctick_anim::{AnimationManager, ManagerError};
use mctick_core::{BlockStore, OrbitPlane, Vec3};

/// Errors raised while parsing or executing an `animate ...` command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// Wrong number of tokens, or an unrecognized verb/shape kind.
    Usage(String),
    /// A token failed to parse as the expected field type.
    InvalidField {
        /// The field name (for the error message).
        field: String,
        /// The offending token.
        token: String,
    },
    /// The manager rejected the (well-formed) command.
    Manager(ManagerError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{msg}"),
            Self::InvalidField { field, token } => {
                write!(f, "invalid {field}: {token:?}")
            }
            Self::Manager(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ManagerError> for CommandError {
    fn from(e: ManagerError) -> Self {
        Self::Manager(e)
    }
}

fn usage(msg: impl Into<String>) -> CommandError {
    CommandError::Usage(msg.into())
}

fn invalid(field: &str, token: &str) -> CommandError {
    CommandError::InvalidField {
        field: field.to_string(),
        token: token.to_string(),
    }
}

fn parse_f64(field: &str, token: &str) -> Result<f64, CommandError> {
    token.parse::<f64>().map_err(|_| invalid(field, token))
}

fn parse_i32(field: &str, token: &str) -> Result<i32, CommandError> {
    token.parse::<i32>().map_err(|_| invalid(field, token))
}

/// Parse a radius-like field as a float and round to the nearest integer,
/// matching `shapes.go`'s `strconv.ParseFloat` + `math.Round` handling for
/// sphere radius and ring inner/outer radius (as opposed to `width`/
/// `height`, which the original parses with `strconv.Atoi`).
fn parse_rounded_radius(field: &str, token: &str, must_be_positive: bool) -> Result<i32, CommandError> {
    let value = parse_f64(field, token)?;
    if must_be_positive && value <= 0.0 {
        return Err(invalid(field, token));
    }
    if !must_be_positive && value < 0.0 {
        return Err(invalid(field, token));
    }
    Ok(value.round() as i32)
}

fn parse_u64(field: &str, token: &str) -> Result<u64, CommandError> {
    token.parse::<u64>().map_err(|_| invalid(field, token))
}

fn parse_bool(field: &str, token: &str) -> Result<bool, CommandError> {
    match token.to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" => Ok(true),
        "0" | "false" | "f" | "no" | "n" => Ok(false),
        _ => Err(invalid(field, token)),
    }
}

fn parse_orbit_plane(token: &str) -> Result<OrbitPlane, CommandError> {
    match token.to_ascii_lowercase().as_str() {
        "xy" => Ok(OrbitPlane::Xy),
        "xz" => Ok(OrbitPlane::Xz),
        "yz" => Ok(OrbitPlane::Yz),
        _ => Err(invalid("plane", token)),
    }
}

fn parse_vec3(field: &str, xs: &str, ys: &str, zs: &str) -> Result<Vec3, CommandError> {
    Ok(Vec3::new(
        parse_f64(&format!("{field}.x"), xs)?,
        parse_f64(&format!("{field}.y"), ys)?,
        parse_f64(&format!("{field}.z"), zs)?,
    ))
}

/// Run one `animate ...` command line (already split on whitespace,
/// leading `"animate"` token already consumed) against `manager`.
pub fn execute<S: BlockStore>(
    tokens: &[&str],
    manager: &mut AnimationManager,
    store: &mut S,
) -> Result<(), CommandError> {
    let verb = tokens.first().ok_or_else(|| usage("usage: animate <verb> ..."))?;
    let rest = &tokens[1..];
    match verb.to_ascii_lowercase().as_str() {
        "create" => create(rest, manager, store),
        "move" => add_move(rest, manager),
        "spin" => add_spin(rest, manager),
        "orbit" => add_orbit(rest, manager),
        "destroy" => destroy(rest, manager),
        "precompute" => precompute(rest, manager),
        other => Err(usage(format!("unknown animate verb: {other}"))),
    }
}

fn create<S: BlockStore>(
    tokens: &[&str],
    manager: &mut AnimationManager,
    store: &mut S,
) -> Result<(), CommandError> {
    if tokens.len() < 2 {
        return Err(usage(
            "usage: animate create <name> <sphere|rect|ring|random> ...",
        ));
    }
    let name = tokens[0];
    let kind = tokens[1].to_ascii_lowercase();
    let args = &tokens[2..];
    match kind.as_str() {
        "sphere" => create_sphere(name, args, manager, store),
        "rect" => create_rect(name, args, manager, store),
        "ring" => create_ring(name, args, manager, store),
        "random" => create_random(name, args, manager, store),
        other => Err(usage(format!("unsupported shape type: {other}"))),
    }
}

fn create_sphere<S: BlockStore>(
    name: &str,
    args: &[&str],
    manager: &mut AnimationManager,
    store: &mut S,
) -> Result<(), CommandError> {
    if args.len() != 6 {
        return Err(usage(
            "usage: animate create <name> sphere <x> <y> <z> <radius> <filled> <block_state>",
        ));
    }
    let origin = parse_vec3("origin", args[0], args[1], args[2])?;
    let radius = parse_rounded_radius("radius", args[3], true)?;
    let filled = parse_bool("filled", args[4])?;
    let block_state = parse_i32("block_state", args[5])?;
    manager.create_sphere(store, name, origin, radius, filled, block_state)?;
    Ok(())
}

fn create_rect<S: BlockStore>(
    name: &str,
    args: &[&str],
    manager: &mut AnimationManager,
    store: &mut S,
) -> Result<(), CommandError> {
    if args.len() != 7 {
        return Err(usage(
            "usage: animate create <name> rect <x> <y> <z> <width> <height> <filled> <block_state>",
        ));
    }
    let origin = parse_vec3("origin", args[0], args[1], args[2])?;
    let width = parse_i32("width", args[3])?;
    let height = parse_i32("height", args[4])?;
    let filled = parse_bool("filled", args[5])?;
    let block_state = parse_i32("block_state", args[6])?;
    manager.create_rect(store, name, origin, width, height, filled, block_state)?;
    Ok(())
}

fn create_ring<S: BlockStore>(
    name: &str,
    args: &[&str],
    manager: &mut AnimationManager,
    store: &mut S,
) -> Result<(), CommandError> {
    if args.len() != 6 {
        return Err(usage(
            "usage: animate create <name> ring <x> <y> <z> <inner_radius> <outer_radius> <block_state>",
        ));
    }
    let origin = parse_vec3("origin", args[0], args[1], args[2])?;
    let inner_radius = parse_rounded_radius("inner_radius", args[3], false)?;
    let outer_radius = parse_rounded_radius("outer_radius", args[4], true)?;
    let block_state = parse_i32("block_state", args[5])?;
    manager.create_ring(store, name, origin, inner_radius, outer_radius, block_state)?;
    Ok(())
}

#[allow(clippy::too_many_lines)]
fn create_random<S: BlockStore>(
    name: &str,
    args: &[&str],
    manager: &mut AnimationManager,
    store: &mut S,
) -> Result<(), CommandError> {
    if args.len() != 11 {
        return Err(usage(
            "usage: animate create <name> random <start_tick> <end_tick> <min_x> <max_x> <min_y> <max_y> <min_z> <max_z> <block_state> <block_num> <seed>",
        ));
    }
    let start_tick = parse_u64("start_tick", args[0])?;
    let end_tick = parse_u64("end_tick", args[1])?;
    let min_x = parse_i32("min_x", args[2])?;
    let max_x = parse_i32("max_x", args[3])?;
    let min_y = parse_i32("min_y", args[4])?;
    let max_y = parse_i32("max_y", args[5])?;
    let min_z = parse_i32("min_z", args[6])?;
    let max_z = parse_i32("max_z", args[7])?;
    let block_state = parse_i32("block_state", args[8])?;
    let block_num = parse_u64("block_num", args[9])?;
    let seed = parse_u64("seed", args[10])?;
    manager.create_random(
        store,
        name,
        start_tick,
        end_tick,
        (min_x, min_y, min_z),
        (max_x, max_y, max_z),
        block_state,
        block_num,
        seed,
    )?;
    Ok(())
}

fn add_move(tokens: &[&str], manager: &mut AnimationManager) -> Result<(), CommandError> {
    if tokens.len() != 6 {
        return Err(usage(
            "usage: animate move <name> <dx> <dy> <dz> <start_tick> <end_tick>",
        ));
    }
    let name = tokens[0];
    let dx = parse_f64("dx", tokens[1])?;
    let dy = parse_f64("dy", tokens[2])?;
    let dz = parse_f64("dz", tokens[3])?;
    let start_tick = parse_u64("start_tick", tokens[4])?;
    let end_tick = parse_u64("end_tick", tokens[5])?;
    manager.add_move(name, dx, dy, dz, start_tick, end_tick)?;
    Ok(())
}

fn add_spin(tokens: &[&str], manager: &mut AnimationManager) -> Result<(), CommandError> {
    if tokens.len() != 6 {
        return Err(usage(
            "usage: animate spin <name> <rad_x> <rad_y> <rad_z> <start_tick> <end_tick>",
        ));
    }
    let name = tokens[0];
    let rad_x = parse_f64("rad_x", tokens[1])?;
    let rad_y = parse_f64("rad_y", tokens[2])?;
    let rad_z = parse_f64("rad_z", tokens[3])?;
    let start_tick = parse_u64("start_tick", tokens[4])?;
    let end_tick = parse_u64("end_tick", tokens[5])?;
    manager.add_spin(name, rad_x, rad_y, rad_z, start_tick, end_tick)?;
    Ok(())
}

fn add_orbit(tokens: &[&str], manager: &mut AnimationManager) -> Result<(), CommandError> {
    if tokens.len() != 6 && tokens.len() != 7 {
        return Err(usage(
            "usage: animate orbit <name> <plane> <radius> <rad_per_tick> <start_tick> <end_tick> [phase_deg]",
        ));
    }
    let name = tokens[0];
    let plane = parse_orbit_plane(tokens[1])?;
    let radius = parse_f64("radius", tokens[2])?;
    if radius <= 0.0 {
        return Err(invalid("radius", tokens[2]));
    }
    let angular_speed = parse_f64("rad_per_tick", tokens[3])?;
    let start_tick = parse_u64("start_tick", tokens[4])?;
    let end_tick = parse_u64("end_tick", tokens[5])?;
    let phase = if tokens.len() == 7 {
        parse_f64("phase_deg", tokens[6])? * std::f64::consts::PI / 180.0
    } else {
        0.0
    };
    manager.add_orbit(name, plane, radius, angular_speed, phase, start_tick, end_tick)?;
    Ok(())
}

fn destroy(tokens: &[&str], manager: &mut AnimationManager) -> Result<(), CommandError> {
    if tokens.len() != 2 {
        return Err(usage("usage: animate destroy <name> <tick>"));
    }
    let name = tokens[0];
    let tick = parse_u64("tick", tokens[1])?;
    manager.destroy(name, tick)?;
    Ok(())
}

fn precompute(tokens: &[&str], manager: &mut AnimationManager) -> Result<(), CommandError> {
    if tokens.len() > 1 {
        return Err(usage("usage: animate precompute [max_tick]"));
    }
    let max_tick_override = match tokens.first() {
        Some(token) => Some(parse_u64("max_tick", token)?),
        None => None,
    };
    manager.precompute(max_tick_override)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mctick_test_utils::FakeBlockStore;

    fn run(line: &str, manager: &mut AnimationManager, store: &mut FakeBlockStore) -> Result<(), CommandError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        execute(&tokens, manager, store)
    }

    #[test]
    fn create_sphere_dispatches_tick_zero_placements() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        run("create s1 sphere 0 0 0 1 true 1", &mut mgr, &mut store).unwrap();
        assert_eq!(store.cell_count(), 19);
    }

    #[test]
    fn sphere_radius_accepts_fractional_input_and_rounds() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        run("create s1 sphere 0 0 0 1.4 true 1", &mut mgr, &mut store).unwrap();
        assert_eq!(store.cell_count(), 19);
    }

    #[test]
    fn ring_inner_outer_accept_fractional_input_and_round() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        run("create r1 ring 0 0 0 1.5 3.5 1", &mut mgr, &mut store).unwrap();
        assert!(store.cell_count() > 0);
    }

    #[test]
    fn ring_inner_ge_outer_is_a_manager_error() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        let err = run("create r1 ring 0 0 0 5 5 1", &mut mgr, &mut store).unwrap_err();
        assert!(matches!(err, CommandError::Manager(_)));
    }

    #[test]
    fn random_block_num_zero_is_a_manager_error() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        let err = run(
            "create rng random 0 1 0 3 0 0 0 3 7 0 42",
            &mut mgr,
            &mut store,
        )
        .unwrap_err();
        assert!(matches!(err, CommandError::Manager(_)));
    }

    #[test]
    fn move_then_precompute_matches_manual_registration() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        run("create r1 rect 0 64 0 3 3 true 2", &mut mgr, &mut store).unwrap();
        run("move r1 1 0 0 0 10", &mut mgr, &mut store).unwrap();
        run("precompute", &mut mgr, &mut store).unwrap();
        assert!(mgr.is_precomputed());
    }

    #[test]
    fn orbit_command_parses_phase_degrees_to_radians() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        run("create o1 sphere 0 0 0 1 true 3", &mut mgr, &mut store).unwrap();
        run("orbit o1 xz 10 0.6283185307179586 0 10 180", &mut mgr, &mut store).unwrap();
        let shape = mgr.shape("o1").unwrap();
        assert!((shape.orbits[0].phase - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn unknown_verb_is_a_usage_error() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        let err = run("frobnicate", &mut mgr, &mut store).unwrap_err();
        assert!(matches!(err, CommandError::Usage(_)));
    }

    #[test]
    fn bad_token_names_the_offending_field() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        let err = run("create s1 sphere 0 0 0 oops true 1", &mut mgr, &mut store).unwrap_err();
        assert_eq!(
            err,
            CommandError::InvalidField {
                field: "radius".into(),
                token: "oops".into(),
            }
        );
    }

    #[test]
    fn destroy_unknown_shape_surfaces_manager_error() {
        let mut store = FakeBlockStore::new();
        let mut mgr = AnimationManager::new();
        let err = run("destroy nope 5", &mut mgr, &mut store).unwrap_err();
        assert!(matches!(err, CommandError::Manager(ManagerError::UnknownShape { .. })));
    }
}
