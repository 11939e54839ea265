/// What the frame loop does after `get_current_texture` fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceRecovery {
    /// Configure the surface again and draw on the next frame.
    Reconfigure,
    /// Transient; drop this frame only.
    SkipFrame,
    /// Stop rendering for the rest of the session.
    Disable,
}

pub fn recovery_for(err: &wgpu::SurfaceError) -> SurfaceRecovery {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceRecovery::Reconfigure,
        wgpu::SurfaceError::OutOfMemory => SurfaceRecovery::Disable,
        _ => SurfaceRecovery::SkipFrame,
    }
}
