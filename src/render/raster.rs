use std::sync::Arc;

use crate::foundation::core::Size;
use crate::foundation::error::FramepaceResult;
use crate::render::surface::{Surface, dims_u16};

/// Wrap a pixmap as an image paint.
pub(crate) fn image_paint(pixmap: Arc<vello_cpu::Pixmap>) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(pixmap),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

/// Fill `bounds` with `image`, stretching its `src` extent to fit.
pub(crate) fn paint_scaled(
    ctx: &mut vello_cpu::RenderContext,
    image: vello_cpu::Image,
    src: Size,
    bounds: kurbo::Rect,
) {
    let (sw, sh) = (f64::from(src.width), f64::from(src.height));
    let tr = kurbo::Affine::translate((bounds.x0, bounds.y0))
        * kurbo::Affine::scale_non_uniform(bounds.width() / sw, bounds.height() / sh);

    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(tr));
    ctx.set_paint(image);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, sw, sh));
}

/// Fresh render context covering the whole of `surface`.
pub(crate) fn context_for(surface: &Surface) -> FramepaceResult<vello_cpu::RenderContext> {
    let (w, h) = dims_u16(surface.size())?;
    Ok(vello_cpu::RenderContext::new(w, h))
}

/// Rasterize everything recorded in `ctx` into `surface`.
pub(crate) fn flush_into(ctx: &mut vello_cpu::RenderContext, surface: &mut Surface) {
    ctx.flush();
    ctx.render_to_pixmap(surface.pixmap_mut());
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}
