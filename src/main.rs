fn main() -> std::io::Result<()> {
    swap_game::front_end::text_protocol::run_stdio_loop()
}
