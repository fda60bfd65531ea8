//! Common test utilities for integration tests.

#![allow(dead_code)]

use orbitview::dataset::load_from_reader;
use orbitview::hierarchy::{Counts, Hierarchy, Star};

/// Two buying entities, three stars. `Sol` is the star picked by default and
/// has three orbits: solid, dashed and glow.
pub const SAMPLE_CSV: &str = "\
Buying Entity,Tenant,Galaxy,Star,Star Color,Star Radius,Orbit ID,Orbit Name,Orbit Type,Orbit Style,Orbit AU,Body Name,Body Type,Body Radius,Period Days
Acme,Ops,Milky Way,Sol,,2,inner,Inner Orbit,inner,,1,Mercury,planet,\"0,4\",88
Acme,Ops,Milky Way,Sol,#ffcc66,,inner,,,,,Venus,planet,\"0,9\",225
Acme,Ops,Milky Way,Sol,,,belt,Main Belt,asteroid,dashed,\"2,7\",Ceres,asteroid,\"0,1\",
Acme,Ops,Milky Way,Sol,,,outer,Giants,outer,glow,5.2,Jupiter,planet,11,4333
Acme,Ops,Whirlpool,Alpheratz,#aabbff,3,,,,,,Nova,planet,1,
Borealis,Labs,Milky Way,Vega,,,,,,,,Lyra b,,,
";

/// Import `csv`, panicking on failure.
pub fn load(csv: &str) -> (Hierarchy, Counts) {
    load_from_reader(csv.as_bytes()).expect("dataset imports")
}

/// The sample hierarchy.
pub fn sample() -> Hierarchy {
    load(SAMPLE_CSV).0
}

/// Star `Sol` from the sample hierarchy.
pub fn sol(hierarchy: &Hierarchy) -> &Star {
    hierarchy
        .star("Acme", "Ops", "Milky Way", "Sol")
        .expect("Sol exists")
}
