use heroreel::components::App;

fn main() {
    dioxus::logger::initialize_default();
    #[cfg(target_arch = "wasm32")]
    dioxus::launch(App);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = App;
}
