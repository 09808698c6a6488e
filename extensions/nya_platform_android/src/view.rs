//! Soft keyboard control for the activity's content view
//!
//! Everything here runs on the `android_main` thread, which does not own
//! the Java view hierarchy. View focus is therefore tracked natively in
//! [`ViewFocus`] and never pushed into `View` itself; NativeActivity's
//! content view already holds window focus. Show and hide go through
//! android-activity, which posts them to the Java main thread, and
//! `InputMethodManager.restartInput` re-posts itself to the view's handler
//! when called from another thread. JNI failures are logged, never
//! propagated.

#[cfg(target_os = "android")]
use android_activity::AndroidApp;
#[cfg(target_os = "android")]
use jni::objects::{GlobalRef, JObject, JValue};
#[cfg(target_os = "android")]
use jni::{JNIEnv, JavaVM};

#[cfg(target_os = "android")]
use nya_platform::{PlatformError, Result, SoftInputView};

/// Focus state of the content view as the keyboard controller left it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewFocus {
    focusable: bool,
    focused: bool,
}

impl ViewFocus {
    /// A view that stops being focusable also loses focus
    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
        if !focusable {
            self.focused = false;
        }
    }

    /// Take focus if the view is focusable; returns whether it holds focus
    pub fn request(&mut self) -> bool {
        self.focused = self.focusable;
        self.focused
    }

    pub fn clear(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

/// The activity's content view as seen by the keyboard controller
#[cfg(target_os = "android")]
pub struct ActivityView {
    app: AndroidApp,
    vm: JavaVM,
    activity: GlobalRef,
    focus: ViewFocus,
}

#[cfg(target_os = "android")]
impl ActivityView {
    pub fn new(app: AndroidApp) -> Result<Self> {
        let jni_err = |e: jni::errors::Error| PlatformError::Jni(e.to_string());

        // SAFETY: android-activity hands out the process JavaVM and a live
        // activity reference for as long as the app runs.
        let vm = unsafe { JavaVM::from_raw(app.vm_as_ptr().cast()) }.map_err(jni_err)?;
        let activity = {
            let env = vm.attach_current_thread().map_err(jni_err)?;
            let local = unsafe { JObject::from_raw(app.activity_as_ptr().cast()) };
            env.new_global_ref(local).map_err(jni_err)?
        };

        Ok(Self {
            app,
            vm,
            activity,
            focus: ViewFocus::default(),
        })
    }

    fn with_decor_view<F>(&self, what: &str, f: F)
    where
        F: for<'local> FnOnce(&mut JNIEnv<'local>, &JObject<'local>) -> jni::errors::Result<()>,
    {
        let mut env = match self.vm.attach_current_thread() {
            Ok(env) => env,
            Err(e) => {
                tracing::warn!("{}: JNI attach failed: {}", what, e);
                return;
            }
        };

        let result = decor_view(&mut env, self.activity.as_obj()).and_then(|view| f(&mut env, &view));
        if let Err(e) = result {
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_describe();
                let _ = env.exception_clear();
            }
            tracing::warn!("{}: {}", what, e);
        }
    }
}

#[cfg(target_os = "android")]
fn decor_view<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject,
) -> jni::errors::Result<JObject<'local>> {
    let window = env
        .call_method(activity, "getWindow", "()Landroid/view/Window;", &[])?
        .l()?;
    env.call_method(&window, "getDecorView", "()Landroid/view/View;", &[])?
        .l()
}

#[cfg(target_os = "android")]
fn input_method_manager<'local>(
    env: &mut JNIEnv<'local>,
    view: &JObject,
) -> jni::errors::Result<JObject<'local>> {
    let context = env
        .call_method(view, "getContext", "()Landroid/content/Context;", &[])?
        .l()?;
    let service = env
        .get_static_field(
            "android/content/Context",
            "INPUT_METHOD_SERVICE",
            "Ljava/lang/String;",
        )?
        .l()?;
    env.call_method(
        &context,
        "getSystemService",
        "(Ljava/lang/String;)Ljava/lang/Object;",
        &[JValue::Object(&service)],
    )?
    .l()
}

#[cfg(target_os = "android")]
impl SoftInputView for ActivityView {
    fn set_focusable(&mut self, focusable: bool) {
        self.focus.set_focusable(focusable);
    }

    fn request_focus(&mut self) {
        if !self.focus.request() {
            tracing::debug!("Focus requested on a non-focusable view");
        }
    }

    fn clear_focus(&mut self) {
        self.focus.clear();
    }

    fn show_soft_input(&mut self) {
        // Explicit show, the NDK's stand-in for SHOW_FORCED
        self.app.show_soft_input(false);
    }

    fn hide_soft_input(&mut self) {
        self.app.hide_soft_input(false);
    }

    fn restart_input(&mut self) {
        if !self.focus.is_focused() {
            tracing::debug!("Input restart skipped, view not focused");
            return;
        }
        self.with_decor_view("restartInput", |env, view| {
            let imm = input_method_manager(env, view)?;
            env.call_method(
                &imm,
                "restartInput",
                "(Landroid/view/View;)V",
                &[JValue::Object(view)],
            )?;
            Ok(())
        });
    }
}
