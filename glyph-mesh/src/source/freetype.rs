use freetype::{
    face::{KerningMode, LoadFlag},
    ffi::FT_Vector,
    Face, Library,
};
use skrifa::outline::OutlinePen;

use std::ffi::{c_int, c_void};

use super::{
    FillOrientation, FontData, GlyphLoadError, GlyphOutline, Hinting, OutlineSource,
    SourceOptions, DPI,
};
use crate::{pen::FlatteningPen, Error};

/// Set on outlines that are filled counter clockwise (PostScript outlines).
const OUTLINE_REVERSE_FILL: c_int = 0x4;

/// Outline source backed by FreeType.
///
/// Side bearing deltas, advances and kerning are the values FreeType
/// computes for the loaded glyph.
pub struct FreeTypeSource {
    // Dropped before the library
    face: Face<FontData>,
    _library: Library,
    load_flags: LoadFlag,
}

impl FreeTypeSource {
    pub fn new(data: &FontData, options: &SourceOptions) -> Result<Self, Error> {
        data.check_index(options.index)?;
        let library = Library::init()?;
        let face = library.new_memory_face2(data.clone(), options.index as isize)?;
        let mut load_flags = LoadFlag::NO_BITMAP;
        // Ignore hinting settings for tricky fonts. Let FreeType do its own
        // thing
        if !face.is_tricky() {
            load_flags |= match options.hinting {
                Hinting::None => LoadFlag::NO_HINTING,
                Hinting::Native => LoadFlag::NO_AUTOHINT,
                Hinting::Auto => LoadFlag::FORCE_AUTOHINT,
                Hinting::Default => LoadFlag::DEFAULT,
            };
        }
        log::debug!(
            "freetype source: {} glyphs, kerning: {}",
            face.num_glyphs(),
            face.has_kerning()
        );
        Ok(Self {
            face,
            _library: library,
            load_flags,
        })
    }

    fn load_flags(&self) -> LoadFlag {
        // LoadFlag isn't Copy or Clone
        LoadFlag::from_bits_truncate(self.load_flags.bits())
    }
}

impl OutlineSource for FreeTypeSource {
    fn set_height(&mut self, height_px: u32) -> Result<(), Error> {
        let size = (height_px as isize) << 6;
        self.face.set_char_size(size, size, DPI, DPI)?;
        Ok(())
    }

    fn glyph_index(&self, ch: char) -> u32 {
        self.face.get_char_index(ch as usize)
    }

    fn load_glyph(
        &mut self,
        glyph_id: u32,
        bezier_steps: u32,
    ) -> Result<GlyphOutline, GlyphLoadError> {
        self.face
            .load_glyph(glyph_id, self.load_flags())
            .map_err(GlyphLoadError::FreeType)?;
        let slot = self.face.glyph();
        if slot.outline().is_none() {
            return Err(GlyphLoadError::NotScalable(glyph_id));
        }
        let raw = slot.raw();
        let mut pen = FlatteningPen::new(bezier_steps);
        let mut ft_pen = FreeTypePen { inner: &mut pen };
        let funcs = freetype::freetype_sys::FT_Outline_Funcs {
            move_to: ft_move_to,
            line_to: ft_line_to,
            conic_to: ft_conic_to,
            cubic_to: ft_cubic_to,
            delta: 0,
            shift: 0,
        };
        // SAFETY: the outline belongs to the glyph slot which is not
        // modified during decomposition and the user pointer refers to a
        // live FreeTypePen
        unsafe {
            freetype::freetype_sys::FT_Outline_Decompose(
                &raw.outline as *const _ as *mut _,
                &funcs,
                (&mut ft_pen) as *mut FreeTypePen as *mut _,
            );
        }
        let orientation = if raw.outline.flags & OUTLINE_REVERSE_FILL != 0 {
            FillOrientation::CounterClockwise
        } else {
            FillOrientation::Clockwise
        };
        Ok(GlyphOutline {
            contours: pen.into_contours(),
            orientation,
            advance: raw.advance.x as i32,
            lsb_delta: raw.lsb_delta as i32,
            rsb_delta: raw.rsb_delta as i32,
        })
    }

    fn has_kerning(&self) -> bool {
        self.face.has_kerning()
    }

    fn kerning(&self, left: u32, right: u32) -> i32 {
        self.face
            .get_kerning(left, right, KerningMode::KerningDefault)
            .map(|delta| delta.x as i32)
            .unwrap_or(0)
    }
}

// The pen is passed through the void* user parameter of
// FT_Outline_Decompose.
struct FreeTypePen<'a> {
    inner: &'a mut FlatteningPen,
}

fn scale_point(p: *const FT_Vector) -> (f32, f32) {
    const SCALE: f32 = 1.0 / 64.0;
    let p = unsafe { &*p };
    (p.x as f32 * SCALE, p.y as f32 * SCALE)
}

fn ft_pen<'a>(user: *mut c_void) -> &'a mut FreeTypePen<'a> {
    // SAFETY: only valid because we pass &mut FreeTypePen as the user
    // parameter to FT_Outline_Decompose
    unsafe { &mut *(user as *mut FreeTypePen) }
}

extern "C" fn ft_move_to(to: *const FT_Vector, user: *mut c_void) -> c_int {
    let (x, y) = scale_point(to);
    ft_pen(user).inner.move_to(x, y);
    0
}

extern "C" fn ft_line_to(to: *const FT_Vector, user: *mut c_void) -> c_int {
    let (x, y) = scale_point(to);
    ft_pen(user).inner.line_to(x, y);
    0
}

extern "C" fn ft_conic_to(
    control: *const FT_Vector,
    to: *const FT_Vector,
    user: *mut c_void,
) -> c_int {
    let (cx0, cy0) = scale_point(control);
    let (x, y) = scale_point(to);
    ft_pen(user).inner.quad_to(cx0, cy0, x, y);
    0
}

extern "C" fn ft_cubic_to(
    control1: *const FT_Vector,
    control2: *const FT_Vector,
    to: *const FT_Vector,
    user: *mut c_void,
) -> c_int {
    let (cx0, cy0) = scale_point(control1);
    let (cx1, cy1) = scale_point(control2);
    let (x, y) = scale_point(to);
    ft_pen(user).inner.curve_to(cx0, cy0, cx1, cy1, x, y);
    0
}
