use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        // Carving and entrance placement need the odd-indexed cell lattice,
        // so anything not odd and at least 3 is rejected up front.
        InvalidDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}: width and height must be odd and at least 3",
                    width, height)
        }

        // Reported separately from malformed content so callers can leave
        // any in-memory maze untouched.
        MazeFileNotFound(path: String) {
            description("maze file not found")
            display("the maze file {} does not exist", path)
        }

        // Ragged rows, non-digit characters, unusable dimensions or missing
        // entrances. Loading fails without installing any partial state.
        MalformedMaze(reason: String) {
            description("malformed maze data")
            display("malformed maze data: {}", reason)
        }
    }
}
