//! Platform glue for spawning UI-triggered background work.

/// Fire-and-forget a future on the platform's executor.
pub fn spawn_future<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(future);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // Native builds only hit this from synchronous UI handlers, so a
        // blocking drive is acceptable there.
        futures::executor::block_on(future);
    }
}
