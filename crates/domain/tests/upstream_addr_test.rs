use dns_sieve_domain::UpstreamAddr;
use std::net::SocketAddr;

#[test]
fn test_parse_ipv4_without_port_uses_default() {
    let addr = UpstreamAddr::parse("8.8.8.8", 53).unwrap();
    let expected: SocketAddr = "8.8.8.8:53".parse().unwrap();
    assert_eq!(addr, UpstreamAddr::Resolved(expected));
}

#[test]
fn test_parse_ipv4_with_port() {
    let addr = UpstreamAddr::parse("1.1.1.1:5353", 53).unwrap();
    assert_eq!(addr.port(), 5353);
    assert!(!addr.is_unresolved());
}

#[test]
fn test_parse_ipv6_variants() {
    let bare = UpstreamAddr::parse("2001:4860:4860::8888", 53).unwrap();
    assert_eq!(bare.port(), 53);
    assert!(bare.socket_addr().unwrap().is_ipv6());

    let bracketed = UpstreamAddr::parse("[2001:4860:4860::8888]:5300", 53).unwrap();
    assert_eq!(bracketed.port(), 5300);

    let bracketed_no_port = UpstreamAddr::parse("[::1]", 53).unwrap();
    assert_eq!(bracketed_no_port.port(), 53);
}

#[test]
fn test_parse_hostname() {
    let addr = UpstreamAddr::parse("dns.google", 53).unwrap();
    assert_eq!(addr.unresolved_parts(), Some(("dns.google", 53)));
    assert_eq!(addr.to_string(), "dns.google:53");
}

#[test]
fn test_parse_hostname_with_port() {
    let addr = UpstreamAddr::parse("resolver.lan:5353", 53).unwrap();
    assert_eq!(addr.unresolved_parts(), Some(("resolver.lan", 5353)));
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(UpstreamAddr::parse("", 53).is_err());
    assert!(UpstreamAddr::parse("udp://8.8.8.8", 53).is_err());
    assert!(UpstreamAddr::parse("bad host", 53).is_err());
    assert!(UpstreamAddr::parse("[zz::1]", 53).is_err());
}
