//! The cropper component: image assignment, layout, gestures and the
//! crop/cancel outcome.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──set_image──▶ Ready ──layout──▶ Interactive ──confirm──▶ Committed
//!                       ▲                    │
//!                       │                    └──────cancel─────▶ Cancelled
//!                       └────────────── set_image (from any state)
//! ```
//!
//! All calls are synchronous and are expected on the host's UI thread. The
//! host collaborators are the [`CropDelegate`], which receives the result,
//! and the [`Presenter`], which hides the cropper.

use crate::config::{ConfigError, CropperConfig};
use crate::crop::{self, CropRequest};
use crate::decode::{DecodedImage, Orientation};
use crate::geometry::{Rect, Size};
use crate::layout;
use crate::transform::{DisplayTransform, GestureEvent};

/// Where the cropper is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropperState {
    /// No image assigned.
    Idle,
    /// Image assigned, waiting for the first layout.
    Ready,
    /// Laid out; gestures are applied.
    Interactive,
    /// The user confirmed the crop and the result was delivered.
    Committed,
    /// The user backed out.
    Cancelled,
}

impl CropperState {
    /// True for `Committed` and `Cancelled`.
    pub fn is_finished(self) -> bool {
        matches!(self, CropperState::Committed | CropperState::Cancelled)
    }
}

/// Answer of [`CropDelegate::did_cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelHandling {
    /// The host took care of dismissal itself.
    Handled,
    /// The host has no cancel handling; the cropper dismisses itself.
    #[default]
    Unhandled,
}

/// Receives the outcome of a cropper session.
pub trait CropDelegate {
    /// Called once when the user confirms the crop.
    ///
    /// `cropped` is `None` if no sub-image could be produced; the original
    /// is never substituted for it.
    fn did_crop(&mut self, original: &DecodedImage, cropped: Option<&DecodedImage>);

    /// Called when the user backs out. Hosts that don't override this get
    /// the cropper dismissing itself.
    fn did_cancel(&mut self) -> CancelHandling {
        CancelHandling::Unhandled
    }
}

/// Shows and hides the cropper on behalf of the host.
pub trait Presenter {
    fn dismiss(&mut self);
}

impl<F> Presenter for F
where
    F: FnMut(),
{
    fn dismiss(&mut self) {
        self()
    }
}

/// Image handed over by the acquisition surface (camera or library picker).
#[derive(Debug, Clone)]
pub struct PickedImage {
    /// Pixels in sensor order.
    pub image: DecodedImage,
    /// How the pixels must be turned to be upright.
    pub orientation: Orientation,
}

/// Result of [`Cropper::confirm`] or [`Cropper::cancel`].
///
/// The original image stays available through [`Cropper::image`].
#[derive(Debug, Clone, PartialEq)]
pub enum CropOutcome {
    /// The crop was confirmed. `cropped` is `None` if extraction failed.
    Cropped { cropped: Option<DecodedImage> },
    /// The user backed out.
    Cancelled,
    /// There was no image to crop; the cropper dismissed itself.
    NoImage,
}

/// A cropper session.
pub struct Cropper<D, P> {
    config: CropperConfig,
    delegate: D,
    presenter: P,
    image: Option<DecodedImage>,
    state: CropperState,
    crop_window: Option<Rect>,
    transform: Option<DisplayTransform>,
    dismissed: bool,
}

impl<D: CropDelegate, P: Presenter> Cropper<D, P> {
    /// Create a cropper with no image.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` does not validate.
    pub fn new(config: CropperConfig, delegate: D, presenter: P) -> Result<Self, ConfigError> {
        config.validate().inspect_err(|e| log::warn!("rejected cropper config: {e}"))?;

        Ok(Self {
            config,
            delegate,
            presenter,
            image: None,
            state: CropperState::Idle,
            crop_window: None,
            transform: None,
            dismissed: false,
        })
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn state(&self) -> CropperState {
        self.state
    }

    /// The original image, if one is assigned.
    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Crop window in container coordinates, once laid out.
    pub fn crop_window(&self) -> Option<Rect> {
        self.crop_window
    }

    pub fn transform(&self) -> Option<&DisplayTransform> {
        self.transform.as_ref()
    }

    /// Frame at which the host should draw the image, once laid out.
    pub fn image_frame(&self) -> Option<Rect> {
        self.transform.map(|t| t.frame())
    }

    /// Whether the host should offer a cancel/retake button.
    pub fn show_cancel_button(&self) -> bool {
        self.config.shows_cancel_button()
    }

    /// Replace the configuration.
    ///
    /// With an image assigned, the session goes back to `Ready` so the next
    /// layout picks up the new aspect ratio.
    pub fn set_config(&mut self, config: CropperConfig) -> Result<(), ConfigError> {
        config.validate().inspect_err(|e| log::warn!("rejected cropper config: {e}"))?;
        self.config = config;
        if self.image.is_some() {
            self.reset_to(CropperState::Ready);
        }
        Ok(())
    }

    /// Assign the image to crop. Returns to `Ready` from any state.
    pub fn set_image(&mut self, image: DecodedImage) {
        log::debug!("image assigned: {}x{}", image.width, image.height);
        self.image = Some(image);
        self.dismissed = false;
        self.reset_to(CropperState::Ready);
    }

    /// Remove the image. Returns to `Idle`.
    pub fn clear_image(&mut self) {
        self.image = None;
        self.dismissed = false;
        self.reset_to(CropperState::Idle);
    }

    /// Accept an image from the picker, making it upright first.
    pub fn pick(&mut self, picked: PickedImage) {
        let PickedImage { image, orientation } = picked;
        self.set_image(image.oriented(orientation));
    }

    /// The host is about to show the cropper.
    ///
    /// Without an image the cropper asks to be dismissed and returns
    /// `false`, on every call; the delegate is not called.
    pub fn appear(&mut self) -> bool {
        if self.image.is_none() {
            log::debug!("appear without image, dismissing");
            self.presenter.dismiss();
            return false;
        }
        true
    }

    /// First layout pass: place the crop window and fit the image into a
    /// container of size `container`.
    ///
    /// Only the first layout after an image assignment has an effect, so
    /// later layout passes don't undo the user's gestures. Returns whether
    /// the transform was (re)initialized.
    pub fn layout(&mut self, container: Size) -> bool {
        if self.state != CropperState::Ready {
            return false;
        }
        let Some(image) = self.image.as_ref() else {
            return false;
        };

        let Some(window) =
            layout::crop_window(container, self.config.aspect_ratio, self.config.fill_fraction)
        else {
            log::warn!("cannot lay out crop window in container {container:?}");
            return false;
        };
        let Some(fit) = layout::fit_image(&window, image.size()) else {
            log::warn!("cannot fit {}x{} image", image.width, image.height);
            return false;
        };

        self.start_interaction(window, fit);
        true
    }

    /// First layout pass with frames computed by the host.
    ///
    /// An `image_frame` smaller than `crop_window` on either axis is grown
    /// to the window size on that axis, so the image is never smaller than
    /// the window.
    pub fn layout_with(&mut self, crop_window: Rect, image_frame: Rect) -> bool {
        if self.state != CropperState::Ready || self.image.is_none() {
            return false;
        }
        if crop_window.is_empty() || image_frame.is_empty() {
            log::warn!("ignoring empty layout: window {crop_window:?}, image {image_frame:?}");
            return false;
        }
        if image_frame.width() < crop_window.width() || image_frame.height() < crop_window.height()
        {
            log::warn!(
                "image frame {image_frame:?} smaller than crop window {crop_window:?}, growing it"
            );
        }

        self.start_interaction(crop_window, image_frame);
        true
    }

    /// Feed one gesture event. Ignored unless `Interactive`.
    ///
    /// Returns the new image frame when the event was applied.
    pub fn handle(&mut self, event: GestureEvent) -> Option<Rect> {
        if self.state != CropperState::Interactive {
            log::debug!("ignoring {event:?} in state {:?}", self.state);
            return None;
        }

        let transform = self.transform?.apply(event);
        if let Some(window) = self.crop_window {
            if !transform.covers(&window) {
                log::debug!("image no longer covers the crop window");
            }
        }
        self.transform = Some(transform);
        Some(transform.frame())
    }

    /// Compute the crop for the current pose without finishing the session.
    pub fn crop_image(&self) -> Option<DecodedImage> {
        let image = self.image.as_ref()?;
        let window = self.crop_window?;
        let frame = self.image_frame()?;

        let request = CropRequest::new(window, frame, image.size());
        crop::crop_image(image, &request, self.config.out_of_bounds)
    }

    /// The user pressed the crop button.
    ///
    /// Delivers `(original, cropped)` to the delegate and dismisses. Returns
    /// `None` if the session already finished.
    pub fn confirm(&mut self) -> Option<CropOutcome> {
        if self.state.is_finished() {
            log::debug!("confirm ignored, session already {:?}", self.state);
            return None;
        }

        let Some(image) = self.image.as_ref() else {
            log::warn!("confirm without image, dismissing");
            self.dismiss_once();
            return Some(CropOutcome::NoImage);
        };

        let cropped = self.crop_image();
        match &cropped {
            Some(c) => log::info!(
                "cropped {}x{} from {}x{}",
                c.width,
                c.height,
                image.width,
                image.height
            ),
            None => log::warn!("crop produced no image"),
        }

        self.delegate.did_crop(image, cropped.as_ref());
        self.state = CropperState::Committed;
        self.dismiss_once();
        Some(CropOutcome::Cropped { cropped })
    }

    /// The user backed out.
    ///
    /// The delegate may handle dismissal; otherwise the cropper dismisses
    /// itself. Returns `None` if the session already finished.
    pub fn cancel(&mut self) -> Option<CropOutcome> {
        if self.state.is_finished() {
            log::debug!("cancel ignored, session already {:?}", self.state);
            return None;
        }

        let handling = self.delegate.did_cancel();
        log::info!("crop cancelled ({handling:?})");
        self.state = CropperState::Cancelled;
        if handling == CancelHandling::Unhandled {
            self.dismiss_once();
        }
        Some(CropOutcome::Cancelled)
    }

    fn start_interaction(&mut self, window: Rect, fit: Rect) {
        log::debug!("layout: crop window {window:?}, image {fit:?}");
        self.crop_window = Some(window);
        self.transform = Some(DisplayTransform::new(fit, window.size));
        self.state = CropperState::Interactive;
    }

    fn reset_to(&mut self, state: CropperState) {
        self.crop_window = None;
        self.transform = None;
        self.state = state;
    }

    fn dismiss_once(&mut self) {
        if !self.dismissed {
            self.dismissed = true;
            self.presenter.dismiss();
        }
    }
}
