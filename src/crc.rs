/// Dallas/Maxim CRC-8 (x^8 + x^5 + x^4 + 1) over `data`, starting from zero
pub fn crc8(data: &[u8]) -> u8 {
    crc8_update(0, data)
}

/// Continue a CRC-8 computation from a previous partial result
pub fn crc8_update(crc: u8, data: &[u8]) -> u8 {
    let mut crc = crc;
    for byte in data.iter() {
        let mut byte = *byte;
        for _ in 0..8 {
            let feedback = (crc ^ byte) & 0x01;
            if feedback != 0 {
                crc ^= 0x18;
            }
            crc = (crc >> 1) & 0x7F;
            if feedback != 0 {
                crc |= 0x80;
            }
            byte >>= 1;
        }
    }
    crc
}

/// Whether `data` ends with a matching CRC byte
pub fn check_crc8(data: &[u8]) -> bool {
    !data.is_empty() && crc8(data) == 0
}
