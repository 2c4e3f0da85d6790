//! `SearchStats` simply tracks block and byte counts for a
//! reconstruction run without any logging or persistence. It is used by
//! the CLI binaries and test helpers.

#[derive(Default)]
pub struct SearchStats {
    pub total_blocks: u64,
    pub solved_blocks: u64,
    pub recovered_bytes: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick_block(&mut self) {
        self.total_blocks += 1;
    }

    pub fn log_solved(&mut self, block_bytes: usize) {
        self.solved_blocks += 1;
        self.recovered_bytes += block_bytes as u64;
    }

    pub fn report(&self) {
        eprintln!(
            "Processed {} blocks, solved {}, recovered {} bytes",
            self.total_blocks, self.solved_blocks, self.recovered_bytes
        );
    }
}
