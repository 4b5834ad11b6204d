use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, EventTarget};

/// Waits for the first of several DOM events on one target.
///
/// Listeners are attached on construction and removed once the wait
/// finishes, so the callback is not leaked.
pub struct FirstEvent {
    target: EventTarget,
    events: &'static [&'static str],
    callback: Closure<dyn FnMut(Event)>,
    promise: js_sys::Promise,
}

impl FirstEvent {
    pub fn listen(target: &EventTarget, events: &'static [&'static str]) -> Result<Self, String> {
        let mut resolve_slot: Option<js_sys::Function> = None;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            resolve_slot = Some(resolve);
        });
        let resolve = resolve_slot.ok_or("Promise executor did not run")?;

        let callback = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::from_str(&ev.type_()));
        });
        for name in events {
            target
                .add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
                .map_err(|e| format!("addEventListener({name}): {e:?}"))?;
        }

        Ok(Self {
            target: target.clone(),
            events,
            callback,
            promise,
        })
    }

    /// Resolves to the type of the event that fired first.
    pub async fn wait(self) -> Result<String, String> {
        let fired = JsFuture::from(self.promise.clone()).await;
        for name in self.events {
            let _ = self
                .target
                .remove_event_listener_with_callback(name, self.callback.as_ref().unchecked_ref());
        }
        fired
            .map_err(|e| format!("event wait failed: {e:?}"))?
            .as_string()
            .ok_or_else(|| "event type was not a string".to_string())
    }
}
