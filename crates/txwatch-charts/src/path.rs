//! SVG path strings

use std::fmt::Write;

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn horizontal_to(mut self, x: f64) -> Self {
        let _ = write!(self.commands, "H{:.2}", x);
        self
    }

    pub fn vertical_to(mut self, y: f64) -> Self {
        let _ = write!(self.commands, "V{:.2}", y);
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push('Z');
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

/// Open polyline through `points`
pub fn line_path(points: &[(f64, f64)]) -> String {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return String::new();
    };

    rest.iter()
        .fold(PathBuilder::new().move_to(x0, y0), |builder, &(x, y)| builder.line_to(x, y))
        .build()
}

/// Closed rectangle outline
pub fn rect_path(x: f64, y: f64, width: f64, height: f64) -> String {
    PathBuilder::new()
        .move_to(x, y)
        .horizontal_to(x + width)
        .vertical_to(y + height)
        .horizontal_to(x)
        .close()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_builder() {
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 100.0)
            .close()
            .build();

        assert!(path.contains("M0.00,0.00"));
        assert!(path.contains("L100.00,100.00"));
        assert!(path.contains("Z"));
    }

    #[test]
    fn test_line_path() {
        let path = line_path(&[(0.0, 0.0), (50.0, 50.0), (100.0, 0.0)]);
        assert_eq!(path, "M0.00,0.00L50.00,50.00L100.00,0.00");
        assert!(line_path(&[]).is_empty());
    }

    #[test]
    fn test_rect_path() {
        assert_eq!(rect_path(1.0, 2.0, 3.0, 4.0), "M1.00,2.00H4.00V6.00H1.00Z");
    }
}
