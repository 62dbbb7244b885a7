// build.rs

fn main() {
    // --- Link against SDL2 ---
    // Try pkg-config first, which is the standard way to find library
    // linking information on Unix-like systems. If pkg-config fails
    // (not installed, or the .pc file is missing), fall back to manually
    // specifying common linker flags.

    match pkg_config::probe_library("sdl2") {
        Ok(_) => {
            // pkg-config has already printed the necessary flags.
            eprintln!("pkg-config found SDL2. Linking configured automatically.");
        }
        Err(_) => {
            // --- Manual Linking Fallback ---
            // Assumes the library is in a standard path like /usr/lib or
            // /usr/local/lib. Adjust the search path if SDL2 lives elsewhere.
            eprintln!("pkg-config failed for 'sdl2'. Falling back to manual linking.");

            println!("cargo:rustc-link-lib=SDL2");
            println!("cargo:rustc-link-search=/usr/lib");
            println!("cargo:rustc-link-search=/usr/local/lib");

            eprintln!("Manual linking flags applied. Ensure the SDL2 development library is installed.");
        }
    }
}
