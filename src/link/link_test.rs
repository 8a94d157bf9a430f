use super::{Session,Error,reply_body,split_reply};
use super::loopback::Loopback;

#[test]
fn reply_ends_with_prompt() {
    let port = Loopback::new().reply("*DRIVE 0\n\r>");
    let mut session = Session::new(port);
    let reply = session.send_and_receive("*DRIVE 0").expect("link error");
    assert_eq!(reply,"*DRIVE 0\n\r>");
    assert_eq!(session.get_ref().sent(),&["*DRIVE 0".to_string()]);
}

#[test]
fn idle_before_prompt() {
    let port = Loopback::new().reply("*DUMP BIG\n\r000000 01 02");
    let mut session = Session::new(port);
    match session.send_and_receive("*DUMP BIG") {
        Err(Error::Timeout { command, received }) => {
            assert_eq!(command,"*DUMP BIG");
            assert_eq!(received,23);
        },
        _ => panic!("expected timeout")
    }
}

#[test]
fn silent_machine() {
    let mut session = Session::new(Loopback::new());
    assert!(matches!(session.send_and_receive("*DRIVE 0"),Err(Error::Timeout { received: 0, .. })));
}

#[test]
fn closed_port() {
    let mut port = Loopback::new().reply("*DRIVE 0\n\r>");
    port.close();
    let mut session = Session::new(port);
    assert!(matches!(session.send_and_receive("*DRIVE 0"),Err(Error::Transport(_))));
}

#[test]
fn either_line_ending() {
    assert_eq!(split_reply("A\n\rB\n\r>"),vec!["A","B",">"]);
    assert_eq!(split_reply("A\r\n\rB\r\n\r>"),vec!["A","B",">"]);
}

#[test]
fn body_between_echo_and_prompt() {
    let body = reply_body("*INFO *.*","*INFO *.*\n\rONE\n\rTWO\n\r>").expect("framing error");
    assert_eq!(body,vec!["ONE","TWO"]);
    let empty = reply_body("*INFO *.*","*INFO *.*\n\r>").expect("framing error");
    assert!(empty.is_empty());
}

#[test]
fn wrong_echo() {
    match reply_body("*INFO *.*","*INFO *\n\rONE\n\r>") {
        Err(Error::Framing { expected, found, .. }) => {
            assert_eq!(expected,"*INFO *.*");
            assert_eq!(found,"*INFO *");
        },
        _ => panic!("expected framing error")
    }
}

#[test]
fn prompt_not_alone() {
    assert!(matches!(reply_body("*DRIVE 0","*DRIVE 0\n\rA>"),Err(Error::Framing { .. })));
    assert!(matches!(reply_body("*DRIVE 0","*DRIVE 0"),Err(Error::Framing { .. })));
}
