//! AppKit implementation of the panel surfaces.

use std::cell::RefCell;
use std::rc::Rc;

use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{DefinedClass, MainThreadOnly, define_class, msg_send};
use objc2_app_kit::{
    NSBackingStoreType, NSColor, NSEvent, NSTextAlignment, NSTextField, NSView, NSWindow,
    NSWindowCollectionBehavior, NSWindowStyleMask,
};
use objc2_core_foundation::{CGPoint, CGRect, CGSize};
use objc2_foundation::{MainThreadMarker, NSString};
use objc2_quartz_core::CATransaction;
use tracing::{debug, warn};

use crate::actor::lock_screen_panel::{PanelSurface, PanelSystem};
use crate::model::geometry::Rect;
use crate::model::panel::{SurfaceContent, SurfaceStyle, Transition};
use crate::sys::screen::{below_shielding_level, main_display_frame};
use crate::sys::skylight::LockScreenSpace;

const LABEL_INSET: f64 = 8.0;

pub type ClickHandler = Rc<dyn Fn()>;

struct PanelContentIvars {
    on_click: RefCell<Option<ClickHandler>>,
}

define_class!(
    #[unsafe(super(NSView))]
    #[thread_kind = MainThreadOnly]
    #[name = "IslandPanelContentView"]
    #[ivars = PanelContentIvars]
    struct PanelContentView;

    impl PanelContentView {
        #[unsafe(method(mouseDown:))]
        fn mouse_down(&self, _event: &NSEvent) {
            let handler = self.ivars().on_click.borrow().clone();
            if let Some(handler) = handler {
                handler();
            }
        }

        #[unsafe(method(acceptsFirstMouse:))]
        fn accepts_first_mouse(&self, _event: Option<&NSEvent>) -> bool { true }
    }
);

impl PanelContentView {
    fn new(mtm: MainThreadMarker, size: CGSize, on_click: Option<ClickHandler>) -> Retained<Self> {
        let frame = CGRect::new(CGPoint::new(0.0, 0.0), size);
        let view = Self::alloc(mtm).set_ivars(PanelContentIvars {
            on_click: RefCell::new(on_click),
        });
        let view: Retained<Self> = unsafe { msg_send![super(view), initWithFrame: frame] };
        view.setWantsLayer(true);
        if let Some(layer) = view.layer() {
            let background = NSColor::colorWithRed_green_blue_alpha(0.0, 0.0, 0.0, 0.85).CGColor();
            layer.setBackgroundColor(Some(&*background));
            layer.setMasksToBounds(true);
        }
        view
    }

    fn add_label(&self, mtm: MainThreadMarker, text: &str) {
        let label = NSTextField::labelWithString(&NSString::from_str(text), mtm);
        label.setTextColor(Some(&*NSColor::whiteColor()));
        label.setAlignment(NSTextAlignment::Center);
        label.sizeToFit();
        let bounds = self.bounds();
        let height = label.frame().size.height;
        label.setFrame(CGRect::new(
            CGPoint::new(LABEL_INSET, (bounds.size.height - height) / 2.0),
            CGSize::new((bounds.size.width - 2.0 * LABEL_INSET).max(0.0), height),
        ));
        self.addSubview(&label);
    }
}

pub struct PanelWindow {
    window: Retained<NSWindow>,
    mtm: MainThreadMarker,
    on_click: Rc<RefCell<Option<ClickHandler>>>,
}

impl PanelWindow {
    pub fn window_number(&self) -> isize { self.window.windowNumber() }
}

impl PanelSurface for PanelWindow {
    fn set_frame(&mut self, frame: Rect, transition: Transition) {
        let frame = CGRect::from(frame);
        match transition {
            Transition::Instant => self.window.setFrame_display(frame, true),
            Transition::Animated { duration } => unsafe {
                let ns_anim_cls = objc2::class!(NSAnimationContext);
                let _: () = msg_send![ns_anim_cls, beginGrouping];
                let current_ctx: *mut AnyObject = msg_send![ns_anim_cls, currentContext];
                let _: () = msg_send![current_ctx, setDuration: duration];
                let animator: *mut AnyObject = msg_send![&*self.window, animator];
                let _: () = msg_send![animator, setFrame: frame, display: true];
                let _: () = msg_send![ns_anim_cls, endGrouping];
            },
        }
    }

    fn set_corner_radius(&mut self, radius: f64, transition: Transition) {
        let Some(layer) = self.window.contentView().and_then(|view| view.layer()) else {
            return;
        };
        match transition {
            Transition::Instant => layer.setCornerRadius(radius),
            Transition::Animated { duration } => {
                CATransaction::begin();
                CATransaction::setAnimationDuration(duration);
                layer.setCornerRadius(radius);
                CATransaction::commit();
            }
        }
    }

    fn set_content(&mut self, content: SurfaceContent) {
        let size = self.window.frame().size;
        let view = match content {
            SurfaceContent::MediaPanel => {
                PanelContentView::new(self.mtm, size, self.on_click.borrow().clone())
            }
            SurfaceContent::Text(text) => {
                let view = PanelContentView::new(self.mtm, size, None);
                view.add_label(self.mtm, &text);
                view
            }
        };
        self.window.setContentView(Some(&**view));
    }

    fn clear_content(&mut self) { self.window.setContentView(None) }

    fn order_front(&mut self) { self.window.orderFrontRegardless() }

    fn order_out(&mut self) { self.window.orderOut(None) }
}

/// The real window server. Clones share the lock screen space and the
/// click handler.
#[derive(Clone)]
pub struct Actual {
    mtm: MainThreadMarker,
    space: Rc<RefCell<Option<LockScreenSpace>>>,
    on_click: Rc<RefCell<Option<ClickHandler>>>,
}

impl Actual {
    pub fn new(mtm: MainThreadMarker) -> Self {
        Self {
            mtm,
            space: Rc::default(),
            on_click: Rc::default(),
        }
    }

    /// Installed on media panel content created from now on.
    pub fn set_click_handler(&self, handler: ClickHandler) {
        *self.on_click.borrow_mut() = Some(handler);
    }
}

impl PanelSystem for Actual {
    type Surface = PanelWindow;

    fn main_display(&self) -> Option<Rect> { main_display_frame(self.mtm) }

    fn create_surface(&mut self, frame: Rect, style: SurfaceStyle) -> PanelWindow {
        let mut mask = NSWindowStyleMask::Borderless;
        if style.non_activating {
            mask |= NSWindowStyleMask::NonactivatingPanel;
        }
        let frame = CGRect::from(frame);
        let window: Retained<NSWindow> = unsafe {
            let obj = NSWindow::alloc(self.mtm);
            msg_send![obj, initWithContentRect: frame, styleMask: mask, backing: NSBackingStoreType::Buffered, defer: false]
        };
        unsafe { window.setReleasedWhenClosed(false) };
        window.setOpaque(false);
        window.setBackgroundColor(Some(&*NSColor::clearColor()));
        window.setLevel(below_shielding_level());
        if style.all_spaces {
            window.setCollectionBehavior(
                NSWindowCollectionBehavior::CanJoinAllSpaces
                    | NSWindowCollectionBehavior::Stationary
                    | NSWindowCollectionBehavior::FullScreenAuxiliary,
            );
        }
        window.setMovable(style.movable);
        window.setHasShadow(style.shadow);

        PanelWindow {
            window,
            mtm: self.mtm,
            on_click: self.on_click.clone(),
        }
    }

    fn delegate_to_lock_screen(&mut self, surface: &mut PanelWindow) {
        let mut space = self.space.borrow_mut();
        if space.is_none() {
            *space = LockScreenSpace::create();
        }
        let Some(space) = space.as_ref() else {
            warn!("no lock screen space; window stays on the regular level");
            return;
        };
        let Ok(number) = u32::try_from(surface.window_number()) else {
            warn!("window has no window server id yet");
            return;
        };
        if space.add_window(number) {
            debug!(window = number, "delegated window to lock screen space");
        }
    }
}
