//! Animation-frame loop handle
//!
//! The host calls back once per display frame. The loop remembers the id of
//! the pending request so teardown can cancel it, and a frame that arrives
//! after cancellation neither runs nor reschedules.

/// Bookkeeping for a self-rescheduling frame callback
#[derive(Debug, Clone, Default)]
pub struct FrameLoopState {
    pending: Option<i32>,
    cancelled: bool,
}

impl FrameLoopState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the id returned by the host for the next frame
    pub fn scheduled(&mut self, id: i32) {
        if !self.cancelled {
            self.pending = Some(id);
        }
    }

    /// Called when a frame fires. Returns false if the loop was cancelled.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        !self.cancelled
    }

    pub fn is_running(&self) -> bool {
        !self.cancelled
    }

    pub fn pending(&self) -> Option<i32> {
        self.pending
    }

    /// Stop the loop. Returns the pending request id to hand back to the host.
    pub fn cancel(&mut self) -> Option<i32> {
        self.cancelled = true;
        self.pending.take()
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use super::FrameLoopState;

    type FrameCallback = Closure<dyn FnMut(f64)>;

    /// `requestAnimationFrame` loop, cancelled on `cancel` or drop.
    ///
    /// Must not be dropped from inside its own callback.
    pub struct AnimationLoop {
        state: Rc<RefCell<FrameLoopState>>,
        callback: Rc<RefCell<Option<FrameCallback>>>,
    }

    impl AnimationLoop {
        /// Start calling `on_frame(timestamp_ms)` every display frame
        pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Self {
            let state = Rc::new(RefCell::new(FrameLoopState::new()));
            let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

            let st = state.clone();
            let cb = callback.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                if !st.borrow_mut().begin_frame() {
                    return;
                }
                on_frame(time);
                if st.borrow().is_running() {
                    if let Some(closure) = cb.borrow().as_ref() {
                        request(&st, closure);
                    }
                }
            }));

            if let Some(closure) = callback.borrow().as_ref() {
                request(&state, closure);
            }
            Self { state, callback }
        }

        pub fn cancel(&self) {
            if let Some(id) = self.state.borrow_mut().cancel() {
                if let Some(window) = web_sys::window() {
                    window.cancel_animation_frame(id).ok();
                }
                log::debug!("Frame loop cancelled");
            }
        }
    }

    impl Drop for AnimationLoop {
        fn drop(&mut self) {
            self.cancel();
            // Breaks the closure -> handle cycle
            self.callback.borrow_mut().take();
        }
    }

    fn request(state: &RefCell<FrameLoopState>, closure: &FrameCallback) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            state.borrow_mut().scheduled(id);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AnimationLoop;
