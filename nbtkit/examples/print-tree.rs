//! Builds a small tree in memory, encodes it and prints what decoding the
//! bytes gives back.

use nbtkit::{Compound, List, NamedTag};

fn main() {
    let mut pos = List::new();
    for v in [1.5f64, 64.0, -20.25] {
        pos.push(v).unwrap();
    }

    let mut player = Compound::new();
    player.push("Name", "Steve");
    player.push("Health", 20.0f32);
    player.push("Pos", pos);
    player.push("Inventory", List::with_kind(nbtkit::TagKind::Compound));

    let bytes = nbtkit::to_bytes(&NamedTag::new("", player)).unwrap();
    println!("{} bytes", bytes.len());

    let root = nbtkit::from_bytes(&bytes).unwrap();
    println!("{}", root);
}
