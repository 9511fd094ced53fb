use docopt::Docopt;
use mazegen::{
    displays::{LayoutDisplay, PathDisplay, StartGoalDisplay},
    generators,
    layout::{MazeLayout, WallOrientation},
    pathing,
    units::{ColumnsCount, NodesCount, RowsCount},
};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    rc::Rc
};

const USAGE: &str = "Mazegen

Usage:
    mazegen_driver -h | --help
    mazegen_driver [--rows=<r> --columns=<c>] [--seed=<s>] [--text-out=<path>] [--mark-start-goal|--show-distances|--show-path] [--save-walls=<path>] [--save-edges=<path>]

Options:
    -h --help            Show this screen.
    --rows=<r>           The grid height in an r*c grid [default: 20].
    --columns=<c>        The grid width in an r*c grid [default: 20].
    --seed=<s>           Unsigned integer seed fixing the maze layout. Random if not given.
    --text-out=<path>    Output file path for the textual rendering of the maze.
    --mark-start-goal    Draw an 'S' on the carve start cell and a 'G' on the goal cell.
    --show-distances     Show the distance from the start cell to every other cell.
    --show-path          Show the shortest path from the start cell to the goal cell.
    --save-walls=<path>  Serialize the standing interior walls to a text file: one `V|H row column` triple per line.
    --save-edges=<path>  Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_mark_start_goal: bool,
    flag_show_distances: bool,
    flag_show_path: bool,
    flag_save_walls: String,
    flag_save_edges: String,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    // Result is a typedef of std `Result` with the error type our own `Error`
    // Defines the From conversions that let try! and ? work for our `Error`.
    // ResultExt adds the `chain_err` trait method.
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            GridConfiguration(::mazegen::dimensions::GridSizeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut maze = generators::generate(RowsCount(args.flag_rows),
                                        ColumnsCount(args.flag_columns),
                                        args.flag_seed)?;

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    if !args.flag_save_walls.is_empty() {

        save_wall_segments(&maze, &args.flag_save_walls)?;
    }

    set_layout_display(&mut maze, &args)?;

    if args.flag_text_out.is_empty() {
        println!("{}", maze);
    } else {
        write_text_to_file(&format!("{}", maze), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Wade through the driver arguments and decide how cells are displayed as text
/// - Nothing in the cells
/// - Start and goal markers
/// - Distances from the start cell to all other cells
/// - The shortest path from the start cell to the goal cell
fn set_layout_display(maze: &mut MazeLayout, maze_args: &MazeArgs) -> Result<()> {

    if maze_args.flag_show_distances || maze_args.flag_show_path {

        let distances = Rc::new(pathing::Distances::new(maze, maze.start())
            .ok_or("Maze start coordinate invalid for the distance flood fill.")?);

        if maze_args.flag_show_distances {

            maze.set_cell_display(Some(distances as Rc<dyn LayoutDisplay>));

        } else {

            let path = pathing::shortest_path(maze, &distances, maze.goal())
                .ok_or("No route from start to goal; the maze is not a perfect maze.")?;
            let display_path = Rc::new(PathDisplay::new(&path));
            maze.set_cell_display(Some(display_path as Rc<dyn LayoutDisplay>));
        }
    } else if maze_args.flag_mark_start_goal {

        let markers = Rc::new(StartGoalDisplay::new(maze.start(), maze.goal()));
        maze.set_cell_display(Some(markers as Rc<dyn LayoutDisplay>));
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &MazeLayout, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let NodesCount(vertices_count) = maze.grid_size().cells_count();
    let edges_count = maze.passages_count();
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(edges_count.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze.iter_passages() {
        let index_a = maze.grid_size()
            .coordinate_to_index(src)
            .expect("Passages iter should give valid coordinate");
        let index_b = maze.grid_size()
            .coordinate_to_index(dst)
            .expect("Passages iter should give valid coordinate");
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}

fn save_wall_segments(maze: &MazeLayout, file_path: &str) -> Result<()> {

    let mut wall_data = String::new();
    for segment in maze.iter_walls() {
        let orientation = match segment.orientation {
            WallOrientation::Vertical => 'V',
            WallOrientation::Horizontal => 'H',
        };
        wall_data.push(orientation);
        wall_data.push(' ');
        wall_data.push_str(segment.cell.row.to_string().as_ref());
        wall_data.push(' ');
        wall_data.push_str(segment.cell.column.to_string().as_ref());
        wall_data.push('\n');
    }

    write_text_to_file(&wall_data, file_path)
        .chain_err(|| format!("Failed to write wall segments to text file {}", file_path))?;

    Ok(())
}
