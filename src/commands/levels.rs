use crate::models::Level;

pub fn run() {
    println!("📊 Recognized levels (largest first)\n");
    for level in Level::all() {
        println!("   {}", level.name());
    }
    println!("\n💡 Pass several with --levels, e.g. --levels DAY,60M,5M");
    println!("   Unrecognized names are dropped; if none is left, DAY is used.");
}
