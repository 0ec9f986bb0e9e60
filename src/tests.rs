#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{GenericImage, ImageFormat, Rgb, RgbImage};
    use itertools::Itertools;

    use crate::{ColorRules, DetectedPuzzle, Location, Point, PuzzleKind, PuzzleLocator, Rect, Rules, Screenshot, Solution, TriangleRules, GRID_SIZE};

    const COLOR_BACKGROUND: Rgb<u8> = Rgb([16, 151, 122]);
    const COLOR_PATHWAY: Rgb<u8> = Rgb([45, 45, 45]);
    const BOXES: [Rgb<u8>; 5] = [
        COLOR_BACKGROUND,
        Rgb([25, 56, 44]),
        Rgb([200, 196, 189]),
        Rgb([139, 143, 75]),
        Rgb([141, 24, 173]),
    ];

    const TRIANGLE_BACKGROUND: Rgb<u8> = Rgb([10, 10, 10]);
    const TRIANGLE_PATHWAY: Rgb<u8> = Rgb([70, 70, 70]);
    // cell shades which, blended with the pathways the sampler also catches, average into each count's bucket
    const TRIANGLES: [Rgb<u8>; 4] = [Rgb([0, 0, 0]), Rgb([40, 40, 40]), Rgb([80, 80, 80]), Rgb([200, 200, 200])];

    /// Pathways of 10 pixels around 40 pixel cells, starting 45 pixels into a 300 pixel square.
    fn render(values: [[u8; GRID_SIZE]; GRID_SIZE], background: Rgb<u8>, pathway: Rgb<u8>, fill: &[Rgb<u8>]) -> RgbImage {
        let on_pathway = |v: u32| (v - 45) % 50 < 10;
        RgbImage::from_fn(300, 300, |x, y| {
            if !(45..255).contains(&x) || !(45..255).contains(&y) {
                background
            } else if on_pathway(x) || on_pathway(y) {
                pathway
            } else {
                fill[values[((y - 45) / 50) as usize][((x - 45) / 50) as usize] as usize]
            }
        })
    }

    fn dump(values: [[u8; GRID_SIZE]; GRID_SIZE]) -> String {
        values.iter().map(|row| format!(":{}:\n", row.iter().join(":"))).join("")
    }

    fn assert_connected_corner_to_corner(solution: &Solution) {
        assert_eq!(solution.locations().next(), Some(Location(0, 4)));
        assert_eq!(solution.locations().last(), Some(Location(4, 0)));
        assert!(solution.locations().tuple_windows().all(|(a, b)| a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1));
        assert_eq!(solution.locations().unique().count(), solution.len());
    }

    const QUARTERS: [[u8; 4]; 4] = [
        [1, 1, 0, 0],
        [1, 1, 0, 0],
        [0, 0, 2, 2],
        [0, 0, 2, 2],
    ];

    #[test]
    fn locate_and_solve_color() {
        let screenshot = Screenshot::from(render(QUARTERS, COLOR_BACKGROUND, COLOR_PATHWAY, &BOXES));
        let detection = PuzzleLocator::default().find(&screenshot).unwrap();
        assert_eq!(detection.kind, PuzzleKind::Color);
        assert_eq!(detection.intensity, 45);
        assert_eq!(detection.bounding_box, Rect::from_edges(45, 45, 254, 254));

        let DetectedPuzzle::Color(mut puzzle) = PuzzleLocator::default().build(&screenshot, &detection) else {
            panic!("expected a color puzzle");
        };
        assert_eq!(puzzle.cell_size(), 52);
        assert_eq!(puzzle.to_string(), dump(QUARTERS));
        assert_eq!(puzzle.cells().map(|cell| cell.center).take(2).collect_vec(), vec![Point::new(71, 71), Point::new(123, 71)]);

        let solution = puzzle.solve().unwrap();
        assert_connected_corner_to_corner(&solution);
        assert_eq!(solution.pixel_path().next(), Some(Point::new(45, 253)));
        assert_eq!(solution.pixel_path().last(), Some(Point::new(253, 45)));

        // the walls the path lays separate black from white
        let mut rules = ColorRules::new();
        for (from, to) in solution.locations().tuple_windows() {
            rules.accept(puzzle.grid(), from, to);
        }
        assert!(puzzle.cells().all(|cell| rules.validate_cell(puzzle.grid(), cell)));

        // solving again finds the same path
        assert_eq!(puzzle.solve(), Some(solution));
    }

    #[test]
    fn inseparable_colors_have_no_solution() {
        let values = [
            [0, 0, 0, 0],
            [0, 3, 4, 0],
            [0, 4, 3, 0],
            [0, 0, 0, 0],
        ];
        let screenshot = Screenshot::from(render(values, COLOR_BACKGROUND, COLOR_PATHWAY, &BOXES));
        let mut puzzle = PuzzleLocator::default().locate(&screenshot).unwrap();
        assert_eq!(puzzle.kind(), PuzzleKind::Color);
        assert_eq!(puzzle.to_string(), dump(values));
        assert!(puzzle.solve().is_none());
    }

    #[test]
    fn locate_and_solve_triangles() {
        let values = [
            [0, 0, 0, 3],
            [0, 0, 0, 0],
            [0, 2, 0, 0],
            [1, 0, 0, 0],
        ];
        let screenshot = Screenshot::from(render(values, TRIANGLE_BACKGROUND, TRIANGLE_PATHWAY, &TRIANGLES));
        let mut puzzle = PuzzleLocator::with_seed(7).locate(&screenshot).unwrap();
        assert_eq!(puzzle.kind(), PuzzleKind::Triangle);
        assert_eq!(puzzle.bounding_box(), Rect::from_edges(45, 45, 254, 254));
        assert_eq!(puzzle.to_string(), dump(values));

        let solution = puzzle.solve().unwrap();
        assert_connected_corner_to_corner(&solution);

        let mut rules = TriangleRules::with_seed(Some(7));
        for (from, to) in solution.locations().tuple_windows() {
            rules.accept(puzzle.grid(), from, to).unwrap();
        }
        assert!(puzzle.cells().all(|cell| rules.validate_cell(puzzle.grid(), cell)));
        assert_eq!(rules.touches(Location(1, 2)), 2);
    }

    #[test]
    fn decoded_landscape_screenshot() {
        let mut landscape = RgbImage::from_pixel(400, 300, COLOR_BACKGROUND);
        landscape.copy_from(&render(QUARTERS, COLOR_BACKGROUND, COLOR_PATHWAY, &BOXES), 50, 0).unwrap();
        let mut png = Cursor::new(Vec::new());
        landscape.write_to(&mut png, ImageFormat::Png).unwrap();

        let screenshot = Screenshot::decode(png.get_ref()).unwrap().into_center_square();
        assert_eq!((screenshot.width(), screenshot.height()), (300, 300));
        let mut puzzle = PuzzleLocator::default().locate(&screenshot).unwrap();
        assert_eq!(puzzle.bounding_box(), Rect::from_edges(45, 45, 254, 254));
        assert!(puzzle.solve().is_some());
    }

    #[test]
    fn no_puzzle_in_a_plain_screenshot() {
        let screenshot = Screenshot::from(RgbImage::from_fn(300, 300, |x, _| Rgb([(x / 3) as u8, 100, 100])));
        assert!(PuzzleLocator::default().locate(&screenshot).is_none());
    }
}
