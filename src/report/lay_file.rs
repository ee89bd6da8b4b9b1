use std::{fmt, fs, io::Write as _, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::{error::LayoutResult, math::format_significant as num},
    gutter::alleys::{Alley, LayoutDescription},
};

/// A layout description rendered as the macro calls the newspaper class reads back.
///
/// ```text
/// \setlength{\textwidth}{490pt}\setlength{\hsize}{\textwidth}
/// \setlength{\hoffset}{5pt}
/// \setlength{\textheight}{690pt}\setlength{\vsize}{\textheight}
/// \setlength{\voffset}{5pt}
/// \valley{<x>pt}{<y end>pt}{<length>pt}
/// \halley{<y>pt}{<x start>pt}{<length>pt}
/// \doarticle{<id>}{<x>pt}{<y>pt}{<w>pt}{<h>pt}{<cols>}
/// ```
pub struct LayFile<'a>(pub &'a LayoutDescription);

impl fmt::Display for LayFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        writeln!(
            f,
            "\\setlength{{\\textwidth}}{{{}pt}}\\setlength{{\\hsize}}{{\\textwidth}}",
            num(d.text_width)
        )?;
        writeln!(f, "\\setlength{{\\hoffset}}{{{}pt}}", num(d.h_margin / 2.0))?;
        writeln!(
            f,
            "\\setlength{{\\textheight}}{{{}pt}}\\setlength{{\\vsize}}{{\\textheight}}",
            num(d.text_height)
        )?;
        writeln!(f, "\\setlength{{\\voffset}}{{{}pt}}", num(d.v_margin / 2.0))?;

        for alley in &d.alleys {
            match *alley {
                Alley::Vertical { x, y_end, .. } => writeln!(
                    f,
                    "\\valley{{{}pt}}{{{}pt}}{{{}pt}}",
                    num(x),
                    num(y_end),
                    num(alley.length())
                )?,
                Alley::Horizontal { y, x_start, .. } => writeln!(
                    f,
                    "\\halley{{{}pt}}{{{}pt}}{{{}pt}}",
                    num(y),
                    num(x_start),
                    num(alley.length())
                )?,
            }
        }

        for art in &d.articles {
            writeln!(
                f,
                "\\doarticle{{{}}}{{{}pt}}{{{}pt}}{{{}pt}}{{{}pt}}{{{}}}",
                art.id,
                num(art.area.x),
                num(art.area.y),
                num(art.area.w),
                num(art.area.h),
                art.num_cols
            )?;
        }
        Ok(())
    }
}

/// Write the layout file, replacing any previous one.
pub fn write_lay_file(desc: &LayoutDescription, path: impl AsRef<Path>) -> LayoutResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create layout dir '{}'", parent.display()))?;
    }
    let mut file = fs::File::create(path)
        .with_context(|| format!("create layout file '{}'", path.display()))?;
    write!(file, "{}", LayFile(desc))
        .with_context(|| format!("write layout file '{}'", path.display()))?;
    tracing::info!(
        path = %path.display(),
        alleys = desc.alleys.len(),
        articles = desc.articles.len(),
        "wrote layout file"
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/report/lay_file.rs"]
mod tests;
