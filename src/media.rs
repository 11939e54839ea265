// Device camera feed rendered as the page background.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Request the camera (rear-facing preferred, no audio) and play it in
/// `video`. Errors are terminal for startup: there is no fallback source.
pub async fn start_camera(video: &web::HtmlVideoElement) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| anyhow::anyhow!("mediaDevices unavailable: {:?}", e))?;

    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&rear_camera_constraint()?);
    constraints.set_audio(&false.into());

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| anyhow::anyhow!("getUserMedia rejected: {:?}", e))?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("camera access failed: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("unexpected getUserMedia result: {:?}", e))?;

    video.set_src_object(Some(&stream));
    let play = video
        .play()
        .map_err(|e| anyhow::anyhow!("video play failed: {:?}", e))?;
    JsFuture::from(play)
        .await
        .map_err(|e| anyhow::anyhow!("video play rejected: {:?}", e))?;
    log::info!(
        "[camera] streaming {}x{}",
        video.video_width(),
        video.video_height()
    );
    Ok(())
}

// `{ facingMode: { ideal: "environment" } }`
fn rear_camera_constraint() -> anyhow::Result<js_sys::Object> {
    let facing = js_sys::Object::new();
    js_sys::Reflect::set(&facing, &"ideal".into(), &"environment".into())
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let video = js_sys::Object::new();
    js_sys::Reflect::set(&video, &"facingMode".into(), &facing)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(video)
}
