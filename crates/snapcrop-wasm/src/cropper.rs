//! WASM bindings for a cropper session.
//!
//! The JavaScript host owns the DOM: it draws the image at
//! `image_frame()`, outlines `crop_window()`, and forwards pointer gestures.
//! Results come back through the `onCrop` callback, and dismissal requests
//! through `onDismiss`.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const cropper = new JsCropper(2 / 3);
//! cropper.set_on_crop((original, cropped) => show(cropped));
//! cropper.set_on_dismiss(() => overlay.remove());
//! cropper.decode_and_set(bytes);
//!
//! if (cropper.appear()) {
//!   cropper.layout(overlay.clientWidth, overlay.clientHeight);
//!   const [x, y, w, h] = cropper.image_frame();
//! }
//!
//! // pinch handler
//! cropper.pinch_began();
//! cropper.pinch_changed(event.scale);
//! ```

use js_sys::Function;
use snapcrop_core::config::CropperConfig;
use snapcrop_core::decode::{self, DecodedImage, Orientation};
use snapcrop_core::geometry::{Point, Rect, Size};
use snapcrop_core::session::{
    CancelHandling, CropDelegate, CropOutcome, Cropper, CropperState, PickedImage, Presenter,
};
use snapcrop_core::transform::GestureEvent;
use wasm_bindgen::prelude::*;

use crate::types::{rect_to_array, JsDecodedImage};

/// Forwards crop and cancel results to JavaScript callbacks.
#[derive(Default)]
struct JsDelegate {
    on_crop: Option<Function>,
    on_cancel: Option<Function>,
}

impl CropDelegate for JsDelegate {
    fn did_crop(&mut self, original: &DecodedImage, cropped: Option<&DecodedImage>) {
        let Some(callback) = &self.on_crop else {
            return;
        };

        let original = JsValue::from(JsDecodedImage::from_decoded(original.clone()));
        let cropped = cropped
            .map(|c| JsValue::from(JsDecodedImage::from_decoded(c.clone())))
            .unwrap_or(JsValue::NULL);

        if let Err(e) = callback.call2(&JsValue::NULL, &original, &cropped) {
            log::error!("onCrop callback threw: {e:?}");
        }
    }

    fn did_cancel(&mut self) -> CancelHandling {
        match &self.on_cancel {
            Some(callback) => {
                if let Err(e) = callback.call0(&JsValue::NULL) {
                    log::error!("onCancel callback threw: {e:?}");
                }
                CancelHandling::Handled
            }
            None => CancelHandling::Unhandled,
        }
    }
}

/// Forwards dismissal requests to a JavaScript callback.
#[derive(Default)]
struct JsPresenter {
    on_dismiss: Option<Function>,
}

impl Presenter for JsPresenter {
    fn dismiss(&mut self) {
        if let Some(callback) = &self.on_dismiss {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                log::error!("onDismiss callback threw: {e:?}");
            }
        }
    }
}

/// Interactive cropper for JavaScript hosts.
#[wasm_bindgen]
pub struct JsCropper {
    inner: Cropper<JsDelegate, JsPresenter>,
}

impl JsCropper {
    fn from_config(config: CropperConfig) -> Result<JsCropper, String> {
        Cropper::new(config, JsDelegate::default(), JsPresenter::default())
            .map(|inner| JsCropper { inner })
            .map_err(|e| e.to_string())
    }
}

#[wasm_bindgen]
impl JsCropper {
    /// Create a cropper for crops of `aspect_ratio` (width / height).
    ///
    /// # Errors
    ///
    /// Returns an error if the aspect ratio is not a positive number.
    #[wasm_bindgen(constructor)]
    pub fn new(aspect_ratio: f64) -> Result<JsCropper, JsValue> {
        Self::from_config(CropperConfig::with_aspect_ratio(aspect_ratio))
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Replace the configuration with a plain object, e.g.
    /// `{ aspectRatio: 1.5, cropButtonText: "Use", outOfBounds: "reject" }`.
    /// Missing fields take their defaults.
    pub fn configure(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: CropperConfig = serde_wasm_bindgen::from_value(config)?;
        self.inner
            .set_config(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `(original, cropped | null) => void`, called on confirm.
    pub fn set_on_crop(&mut self, callback: Option<Function>) {
        self.inner.delegate_mut().on_crop = callback;
    }

    /// `() => void`, called on cancel. Without it the cropper dismisses itself.
    pub fn set_on_cancel(&mut self, callback: Option<Function>) {
        self.inner.delegate_mut().on_cancel = callback;
    }

    /// `() => void`, called when the cropper should be hidden.
    pub fn set_on_dismiss(&mut self, callback: Option<Function>) {
        self.inner.presenter_mut().on_dismiss = callback;
    }

    /// Assign an already decoded, upright image.
    pub fn set_image(&mut self, image: &JsDecodedImage) {
        self.inner.set_image(image.to_decoded());
    }

    /// Assign an image in sensor order with its EXIF orientation (1-8).
    pub fn pick(&mut self, image: &JsDecodedImage, orientation: u8) {
        self.inner.pick(PickedImage {
            image: image.to_decoded(),
            orientation: Orientation::from(orientation as u32),
        });
    }

    /// Decode a JPEG/PNG file and assign it.
    pub fn decode_and_set(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let image = decode::decode_image(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.set_image(image);
        Ok(())
    }

    /// Call before showing. Returns false (and dismisses) without an image.
    pub fn appear(&mut self) -> bool {
        self.inner.appear()
    }

    /// First layout in a container of the given size.
    pub fn layout(&mut self, width: f64, height: f64) -> bool {
        self.inner.layout(Size::new(width, height))
    }

    /// First layout with host-computed frames, each `[x, y, width, height]`.
    pub fn layout_with(&mut self, crop_window: &[f64], image_frame: &[f64]) -> bool {
        match (array_to_rect(crop_window), array_to_rect(image_frame)) {
            (Some(window), Some(frame)) => self.inner.layout_with(window, frame),
            _ => {
                log::warn!("layout_with expects two [x, y, width, height] arrays");
                false
            }
        }
    }

    /// A pinch started, optionally at the given midpoint.
    pub fn pinch_began(&mut self, anchor_x: Option<f64>, anchor_y: Option<f64>) -> bool {
        let anchor = anchor_x.zip(anchor_y).map(|(x, y)| Point::new(x, y));
        self.handle(GestureEvent::PinchBegan { anchor })
    }

    /// Cumulative scale since `pinch_began`.
    pub fn pinch_changed(&mut self, scale: f64) -> bool {
        self.handle(GestureEvent::PinchChanged { scale })
    }

    /// A pan started.
    pub fn pan_began(&mut self) -> bool {
        self.handle(GestureEvent::PanBegan)
    }

    /// Cumulative translation since `pan_began`.
    pub fn pan_changed(&mut self, dx: f64, dy: f64) -> bool {
        self.handle(GestureEvent::PanChanged { dx, dy })
    }

    /// The current gesture ended.
    pub fn gesture_ended(&mut self) -> bool {
        self.handle(GestureEvent::Ended)
    }

    /// Apply a gesture given as a tagged object, e.g.
    /// `{ kind: "pinchChanged", scale: 1.2 }` or `{ kind: "panBegan" }`.
    pub fn handle_gesture(&mut self, event: JsValue) -> Result<bool, JsValue> {
        let event: GestureEvent = serde_wasm_bindgen::from_value(event)?;
        Ok(self.handle(event))
    }

    /// Where to draw the image, `[x, y, width, height]`, once laid out.
    pub fn image_frame(&self) -> Option<Vec<f64>> {
        self.inner.image_frame().map(rect_to_array)
    }

    /// Where to draw the crop window, `[x, y, width, height]`, once laid out.
    pub fn crop_window(&self) -> Option<Vec<f64>> {
        self.inner.crop_window().map(rect_to_array)
    }

    /// Lifecycle state: "idle", "ready", "interactive", "committed" or "cancelled".
    pub fn state(&self) -> String {
        state_name(self.inner.state()).to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn crop_button_text(&self) -> String {
        self.inner.config().crop_button_text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn cancel_button_text(&self) -> String {
        self.inner.config().cancel_button_text.clone()
    }

    /// Whether to show the cancel/retake button (hidden for camera captures).
    pub fn show_cancel_button(&self) -> bool {
        self.inner.show_cancel_button()
    }

    /// Crop for the current pose, without finishing the session.
    pub fn preview(&self) -> Option<JsDecodedImage> {
        self.inner.crop_image().map(JsDecodedImage::from_decoded)
    }

    /// Confirm the crop. Calls `onCrop`, then dismisses.
    ///
    /// Returns the cropped image, or nothing if there was no image, the
    /// crop failed, or the session already finished.
    pub fn confirm(&mut self) -> Option<JsDecodedImage> {
        match self.inner.confirm()? {
            CropOutcome::Cropped { cropped } => cropped.map(JsDecodedImage::from_decoded),
            CropOutcome::Cancelled | CropOutcome::NoImage => None,
        }
    }

    /// Back out. Calls `onCancel` or dismisses. Returns false if the
    /// session already finished.
    pub fn cancel(&mut self) -> bool {
        self.inner.cancel().is_some()
    }
}

impl JsCropper {
    fn handle(&mut self, event: GestureEvent) -> bool {
        self.inner.handle(event).is_some()
    }
}

fn array_to_rect(values: &[f64]) -> Option<Rect> {
    match *values {
        [x, y, width, height] => Some(Rect::new(x, y, width, height)),
        _ => None,
    }
}

fn state_name(state: CropperState) -> &'static str {
    match state {
        CropperState::Idle => "idle",
        CropperState::Ready => "ready",
        CropperState::Interactive => "interactive",
        CropperState::Committed => "committed",
        CropperState::Cancelled => "cancelled",
    }
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn ready(ratio: f64) -> JsCropper {
        let mut c = JsCropper::new(ratio).unwrap();
        c.set_image(&JsDecodedImage::new(60, 40, vec![10u8; 60 * 40 * 3]));
        c
    }

    #[wasm_bindgen_test]
    fn test_constructor_rejects_bad_ratio() {
        assert!(JsCropper::new(-1.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_handle_gesture_object() {
        let mut c = ready(1.0);
        c.layout(100.0, 100.0);

        let event = js_sys::JSON::parse(r#"{"kind":"pinchBegan","anchor":null}"#).unwrap();
        assert!(c.handle_gesture(event).unwrap());
        let event = js_sys::JSON::parse(r#"{"kind":"pinchChanged","scale":2}"#).unwrap();
        assert!(c.handle_gesture(event).unwrap());

        let bogus = js_sys::JSON::parse(r#"{"kind":"twist"}"#).unwrap();
        assert!(c.handle_gesture(bogus).is_err());
    }

    #[wasm_bindgen_test]
    fn test_configure_from_object() {
        let mut c = ready(1.0);
        let config =
            js_sys::JSON::parse(r#"{"aspectRatio":2.0,"cropButtonText":"Use","source":"camera"}"#)
                .unwrap();
        c.configure(config).unwrap();
        assert_eq!(c.crop_button_text(), "Use");
        assert!(!c.show_cancel_button());

        let bad = js_sys::JSON::parse(r#"{"aspectRatio":0}"#).unwrap();
        assert!(c.configure(bad).is_err());
    }

    #[wasm_bindgen_test]
    fn test_crop_callback_receives_images() {
        let mut c = ready(1.0);
        let seen = js_sys::Array::new();
        let seen_in = seen.clone();
        let callback = Closure::<dyn FnMut(JsValue, JsValue)>::new(move |o: JsValue, r: JsValue| {
            seen_in.push(&o);
            seen_in.push(&r);
        });
        c.set_on_crop(Some(callback.as_ref().unchecked_ref::<Function>().clone()));

        c.layout(100.0, 100.0);
        assert!(c.confirm().is_some());
        assert_eq!(seen.length(), 2);
        assert!(!seen.get(1).is_null());
    }
}
