fn main() {
  progress_engine_lib::run()
}
