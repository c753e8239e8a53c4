use crate::subscription::Subscription;

/// Runs a callback before the next repaint. Dropping the returned
/// subscription cancels the callback if it has not run yet.
pub trait FrameScheduler {
    fn request(&self, tick: Box<dyn FnOnce()>) -> Subscription;
}

#[cfg(target_arch = "wasm32")]
pub struct AnimationFrames;

#[cfg(target_arch = "wasm32")]
impl FrameScheduler for AnimationFrames {
    fn request(&self, tick: Box<dyn FnOnce()>) -> Subscription {
        let frame = gloo_render::request_animation_frame(move |_timestamp| tick());
        Subscription::new(move || drop(frame))
    }
}
