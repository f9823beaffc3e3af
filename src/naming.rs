//! Randomized output names.
//!
//! Decorative `Adjective_Noun_NNNN` names for auto-named output files;
//! not part of the core assembly contract.

use rand::Rng;
use rand::seq::IndexedRandom;

const ADJECTIVES: [&str; 20] = [
    "Cosmic",
    "Stellar",
    "Galactic",
    "Nebulous",
    "Celestial",
    "Astral",
    "Lunar",
    "Solar",
    "Interstellar",
    "Meteoric",
    "Supernova",
    "Quantum",
    "Orbital",
    "Gravitational",
    "Wormhole",
    "Hyperdrive",
    "Plasma",
    "Neutron",
    "Antimatter",
    "Stardust",
];

const NOUNS: [&str; 20] = [
    "Voyager",
    "Nebula",
    "Pulsar",
    "Quasar",
    "Supernova",
    "Comet",
    "Asteroid",
    "Constellation",
    "Galaxy",
    "Starship",
    "Cosmos",
    "Singularity",
    "Warp",
    "Nexus",
    "Cluster",
    "Nova",
    "Eclipse",
    "Horizon",
    "Zenith",
    "Vortex",
];

/// Generate a two-word randomized name with a numeric suffix.
pub fn generate_name() -> String {
    let mut rng = rand::rng();

    let adjective = ADJECTIVES
        .choose(&mut rng)
        .copied()
        .unwrap_or("Cosmic");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("Voyager");
    let suffix: u32 = rng.random_range(1000..=9999);

    format!("{adjective}_{noun}_{suffix}")
}

/// Generate a randomized output filename with the `.pdf` extension.
pub fn generate_filename() -> String {
    format!("{}.pdf", generate_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_shape() {
        let name = generate_name();
        let parts: Vec<&str> = name.split('_').collect();

        assert_eq!(parts.len(), 3);
        assert!(ADJECTIVES.contains(&parts[0]));
        assert!(NOUNS.contains(&parts[1]));

        let suffix: u32 = parts[2].parse().unwrap();
        assert!((1000..=9999).contains(&suffix));
    }

    #[test]
    fn test_filename_extension() {
        assert!(generate_filename().ends_with(".pdf"));
    }
}
