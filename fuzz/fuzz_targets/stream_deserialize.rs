use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            // A stream that parses must re-serialize byte-identically;
            // anything else is silently accepted corruption.
            if let Ok(stream) = revenant::DigestStream::deserialize(data) {
                assert_eq!(stream.serialize(), data);
            }
        });
    }
}
