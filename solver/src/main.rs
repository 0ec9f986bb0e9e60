use flexi_logger::Logger;
use image::{Rgb, RgbImage};
use itertools::Itertools;
use trellis::{PuzzleLocator, Screenshot};

// black boxes top left, white bottom right, green and purple in the other corners
const BOXES: [[usize; 4]; 4] = [
    [1, 1, 0, 3],
    [1, 0, 0, 0],
    [0, 0, 0, 2],
    [4, 0, 2, 2],
];

const PALETTE: [Rgb<u8>; 5] = [
    Rgb([16, 151, 122]),
    Rgb([25, 56, 44]),
    Rgb([200, 196, 189]),
    Rgb([139, 143, 75]),
    Rgb([141, 24, 173]),
];

fn render() -> RgbImage {
    let on_pathway = |v: u32| (v - 45) % 50 < 10;
    RgbImage::from_fn(300, 300, |x, y| {
        if !(45..255).contains(&x) || !(45..255).contains(&y) {
            PALETTE[0]
        } else if on_pathway(x) || on_pathway(y) {
            Rgb([45, 45, 45])
        } else {
            PALETTE[BOXES[((y - 45) / 50) as usize][((x - 45) / 50) as usize]]
        }
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let screenshot = Screenshot::from(render());
    let Some(mut puzzle) = PuzzleLocator::default().locate(&screenshot) else {
        println!("no puzzle found");
        return Ok(());
    };

    println!("{} puzzle at {:?}", puzzle.kind(), puzzle.bounding_box());
    print!("{}", puzzle);

    match puzzle.solve() {
        Some(solution) => println!("{}", solution.pixel_path().map(|point| format!("({}, {})", point.x, point.y)).join(" -> ")),
        None => println!("no solution"),
    }

    Ok(())
}
