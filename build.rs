fn main() {
    // Tauri build embeds the window config and icons. The core library has
    // no native build steps: libwebp is compiled by `libwebp-sys` itself.
    #[cfg(feature = "desktop")]
    tauri_build::build()
}
