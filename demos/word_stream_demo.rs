use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    wordflux::example_apps::run_word_stream_demo(std::env::args().skip(1))
}
